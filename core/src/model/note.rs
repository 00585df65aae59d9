use actstream::{Field, Object as _};

use crate::{feed::Feed, Mapper};

use super::{ids, Merge, Object, ObjectBase, Parse};

/// Notes, and comments (which are notes replying to something)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
	pub base: ObjectBase,
	pub to: Vec<String>,
	pub cc: Vec<String>,
	/// whether the authenticated user favorited it
	pub liked: Option<bool>,
	pub in_reply_to: Option<Box<Object>>,
	pub replies: Option<Feed>,
	pub likes: Option<Feed>,
	pub shares: Option<Feed>,
}

impl Note {
	pub fn is_public(&self) -> bool {
		self.to.iter().chain(self.cc.iter()).any(|x| x == actstream::PUBLIC)
	}
}

impl Parse for Note {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let feed = |x: Field<&serde_json::Value>| x.ok().map(|x| Feed::from_payload(x, mapper));
		let in_reply_to = match data.in_reply_to() {
			Ok(x) => Some(Box::new(mapper.parse(x)?)),
			Err(_) => None,
		};
		Ok(Note {
			base: ObjectBase::parse(data, mapper, true)?,
			to: ids(data.to()),
			cc: ids(data.cc()),
			liked: data.liked().ok(),
			in_reply_to,
			replies: feed(data.replies()),
			likes: feed(data.likes()),
			shares: feed(data.shares()),
		})
	}
}

impl Merge for Note {
	fn merge(self, newer: Self) -> Self {
		Note {
			base: self.base.merge(newer.base),
			to: if newer.to.is_empty() { self.to } else { newer.to },
			cc: if newer.cc.is_empty() { self.cc } else { newer.cc },
			liked: newer.liked.or(self.liked),
			in_reply_to: self.in_reply_to.merge(newer.in_reply_to),
			replies: self.replies.merge(newer.replies),
			likes: self.likes.merge(newer.likes),
			shares: self.shares.merge(newer.shares),
		}
	}
}
