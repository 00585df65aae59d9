use actstream::{Collection as _, Field, Verb};

use crate::{feed::Feed, Mapper, Pump, PumpResult};

use super::{Merge, Object, ObjectBase, Parse};

/// User-curated list of objects (usually people), which is also a feed of its members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
	pub base: ObjectBase,
	pub members: Feed,
}

impl Collection {
	/// put `member` in this collection, posting one `add` activity
	pub fn add(&mut self, pump: &Pump, member: &Object) -> PumpResult<Object> {
		let activity = pump.post_verb(Verb::Add, member.reference(), Some(self.base.reference()))?;
		self.members.invalidate();
		Ok(activity)
	}

	/// take `member` out of this collection, posting one `remove` activity
	pub fn remove(&mut self, pump: &Pump, member: &Object) -> PumpResult<Object> {
		let activity = pump.post_verb(Verb::Remove, member.reference(), Some(self.base.reference()))?;
		self.members.invalidate();
		Ok(activity)
	}
}

impl Parse for Collection {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let base = ObjectBase::parse(data, mapper, true)?;
		let mut members = match data.members() {
			Ok(x) => Feed::from_payload(x, mapper),
			Err(_) => Feed::default(),
		};
		if members.url.is_none() {
			members.url = base.links.get("members").map(str::to_string);
		}
		Ok(Collection { base, members })
	}
}

impl Merge for Collection {
	fn merge(self, newer: Self) -> Self {
		Collection {
			base: self.base.merge(newer.base),
			members: self.members.merge(newer.members),
		}
	}
}
