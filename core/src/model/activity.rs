use actstream::{Activity as _, Field, Object as _, ObjectMut as _, Verb};

use crate::Mapper;

use super::{Merge, Object, ObjectBase, Parse};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activity {
	pub base: ObjectBase,
	pub verb: String,
	pub actor: Option<Box<Object>>,
	pub object: Option<Box<Object>>,
	pub target: Option<Box<Object>>,
	pub generator: Option<Box<Object>>,
	pub received: Option<chrono::DateTime<chrono::Utc>>,
}

impl Activity {
	/// verbs outside of the known vocabulary are kept as strings but give `None` here
	pub fn verb_kind(&self) -> Option<Verb> {
		Verb::try_from(self.verb.as_str()).ok()
	}

	pub fn actor(&self) -> Option<&Object> {
		self.actor.as_deref()
	}

	pub fn object(&self) -> Option<&Object> {
		self.object.as_deref()
	}

	pub fn target(&self) -> Option<&Object> {
		self.target.as_deref()
	}
}

impl Parse for Activity {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let nested = |x: Field<&serde_json::Value>| -> Field<Option<Box<Object>>> {
			match x {
				Ok(x) => Ok(Some(Box::new(mapper.parse(x)?))),
				Err(_) => Ok(None),
			}
		};

		// objects posted by the actor often come without an author of their own
		let object = match (data.object(), data.actor()) {
			(Ok(object), Ok(actor)) if object.is_object() && object.author().is_err() =>
				Some(Box::new(mapper.parse(&object.clone().set_author(Some(actor.clone())))?)),
			(object, _) => nested(object)?,
		};

		Ok(Activity {
			base: ObjectBase::parse(data, mapper, true)?,
			verb: data.verb().unwrap_or("post").to_lowercase(),
			actor: nested(data.actor())?,
			object,
			target: nested(data.target())?,
			generator: nested(data.generator())?,
			received: data.received().ok(),
		})
	}
}

impl Merge for Activity {
	fn merge(self, newer: Self) -> Self {
		Activity {
			base: self.base.merge(newer.base),
			verb: if newer.verb.is_empty() { self.verb } else { newer.verb },
			actor: self.actor.merge(newer.actor),
			object: self.object.merge(newer.object),
			target: self.target.merge(newer.target),
			generator: self.generator.merge(newer.generator),
			received: newer.received.or(self.received),
		}
	}
}

#[cfg(test)]
mod test {
	use actstream::Verb;

	use crate::{Mapper, Object};

	#[test]
	fn posted_object_inherits_actor_as_author() {
		let obj = Mapper::new().get_object(&serde_json::json!({
			"objectType": "activity",
			"id": "https://pump.example/api/activity/1",
			"verb": "post",
			"actor": { "objectType": "person", "id": "acct:alice@pump.example", "displayName": "Alice" },
			"object": { "objectType": "note", "id": "https://pump.example/api/note/1", "content": "hi" },
			"generator": { "objectType": "application", "displayName": "Pumpa" },
			"received": "2024-03-01T10:00:00Z",
		})).unwrap();

		let activity = obj.as_activity().unwrap();
		assert_eq!(activity.verb_kind(), Some(Verb::Post));
		assert_eq!(activity.actor().map(|x| x.id()), Some("acct:alice@pump.example"));
		let note = activity.object().unwrap();
		assert!(matches!(note, Object::Note(_)));
		assert_eq!(note.author().and_then(|x| x.display_name()), Some("Alice"));
		assert_eq!(activity.generator.as_deref().and_then(|x| x.display_name()), Some("Pumpa"));
		assert!(activity.received.is_some());
	}

	#[test]
	fn explicit_author_is_kept() {
		let obj = Mapper::new().get_object(&serde_json::json!({
			"objectType": "activity",
			"id": "https://pump.example/api/activity/2",
			"verb": "share",
			"actor": { "objectType": "person", "id": "acct:alice@pump.example" },
			"object": {
				"objectType": "note",
				"id": "https://pump.example/api/note/7",
				"author": { "objectType": "person", "id": "acct:bob@pump.example" },
			},
		})).unwrap();

		let activity = obj.as_activity().unwrap();
		assert_eq!(activity.verb_kind(), Some(Verb::Share));
		assert_eq!(activity.object().and_then(|x| x.author()).map(|x| x.id()), Some("acct:bob@pump.example"));
	}

	#[test]
	fn unknown_verbs_are_kept_as_text() {
		let obj = Mapper::new().get_object(&serde_json::json!({
			"objectType": "activity", "id": "x", "verb": "Tag",
		})).unwrap();
		let activity = obj.as_activity().unwrap();
		assert_eq!(activity.verb, "tag");
		assert_eq!(activity.verb_kind(), None);
		assert!(activity.object().is_none());
	}

	#[test]
	fn activities_need_an_id() {
		assert!(Mapper::new().get_object(&serde_json::json!({ "objectType": "activity", "verb": "post" })).is_err());
	}
}
