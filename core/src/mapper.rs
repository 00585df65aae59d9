use std::collections::HashMap;

use actstream::{Base, BaseMut, Field, ObjectType};

use crate::{config::MapperConfig, model::{Activity, Application, Collection, Media, MediaKind, Note, Object, Person, Place, Unknown, Parse}, PumpError, PumpResult};

/// tags understood out of the box, `service` is what some servers call their generators
const REGISTRY : &[(&str, ObjectType)] = &[
	("person", ObjectType::Person),
	("note", ObjectType::Note),
	("comment", ObjectType::Comment),
	("image", ObjectType::Image),
	("video", ObjectType::Video),
	("audio", ObjectType::Audio),
	("collection", ObjectType::Collection),
	("place", ObjectType::Place),
	("activity", ObjectType::Activity),
	("application", ObjectType::Application),
	("service", ObjectType::Application),
];

/// Turns raw payloads into typed [Object]s, dispatching on their `objectType`
#[derive(Debug, Clone)]
pub struct Mapper {
	registry: HashMap<String, ObjectType>,
	extra_link_keys: Vec<String>,
}

impl Default for Mapper {
	fn default() -> Self {
		Mapper::new()
	}
}

impl Mapper {
	pub fn new() -> Self {
		Mapper {
			registry: REGISTRY
				.iter()
				.map(|(tag, kind)| (tag.to_string(), *kind))
				.collect(),
			extra_link_keys: Vec::new(),
		}
	}

	pub fn with_config(cfg: &MapperConfig) -> Self {
		let mut mapper = Mapper::new();
		mapper.extra_link_keys = cfg.extra_link_keys.clone();
		mapper
	}

	/// map another tag onto a known kind, e.g. vendor-specific spellings
	pub fn register(&mut self, tag: &str, kind: ObjectType) {
		self.registry.insert(tag.to_lowercase(), kind);
	}

	pub fn resolve(&self, tag: &str) -> Option<ObjectType> {
		self.registry.get(&tag.to_lowercase()).copied()
	}

	pub fn extra_link_keys(&self) -> &[String] {
		&self.extra_link_keys
	}

	/// Never fails because of the type tag: unknown ones give [Object::Unknown].
	/// Known kinds missing a required field give [PumpError::Deserialization].
	pub fn get_object(&self, data: &serde_json::Value) -> PumpResult<Object> {
		if !data.is_object() {
			return Err(PumpError::Malformed("expected a json object"));
		}
		Ok(self.parse(data)?)
	}

	pub(crate) fn parse(&self, data: &serde_json::Value) -> Field<Object> {
		let tag = data.object_type().unwrap_or_default();
		match self.resolve(tag) {
			Some(kind) => construct(kind, data, self),
			None => {
				if !tag.is_empty() {
					tracing::debug!("no mapping for object type '{tag}', keeping it as unknown");
				}
				Ok(Object::Unknown(Unknown::parse(data, self)?))
			},
		}
	}

	/// Map feed items, tagging untyped ones with `implicit_type` first.
	/// Items that can't be mapped are logged and skipped.
	pub fn get_objects(&self, items: impl IntoIterator<Item = serde_json::Value>, implicit_type: Option<&str>) -> Vec<Object> {
		let mut out = Vec::new();
		for mut item in items {
			if !item.is_object() {
				tracing::warn!("skipping feed item which is not an object: {item}");
				continue;
			}
			if let Some(implicit) = implicit_type {
				if item.object_type().is_err() {
					item = item.set_object_type(Some(implicit));
				}
			}
			match self.parse(&item) {
				Ok(obj) => out.push(obj),
				Err(e) => tracing::warn!("skipping malformed feed item: {e}"),
			}
		}
		out
	}
}

fn construct(kind: ObjectType, data: &serde_json::Value, mapper: &Mapper) -> Field<Object> {
	Ok(match kind {
		ObjectType::Person => Object::Person(Person::parse(data, mapper)?),
		ObjectType::Note => Object::Note(Note::parse(data, mapper)?),
		ObjectType::Comment => Object::Comment(Note::parse(data, mapper)?),
		ObjectType::Image => Object::Image(Media::parse_kind(data, mapper, MediaKind::Image)?),
		ObjectType::Video => Object::Video(Media::parse_kind(data, mapper, MediaKind::Video)?),
		ObjectType::Audio => Object::Audio(Media::parse_kind(data, mapper, MediaKind::Audio)?),
		ObjectType::Collection => Object::Collection(Collection::parse(data, mapper)?),
		ObjectType::Place => Object::Place(Place::parse(data, mapper)?),
		ObjectType::Activity => Object::Activity(Activity::parse(data, mapper)?),
		ObjectType::Application | ObjectType::Service => Object::Application(Application::parse(data, mapper)?),
	})
}

#[cfg(test)]
mod test {
	use actstream::ObjectType;

	use super::Mapper;
	use crate::{config::MapperConfig, Object};

	#[test]
	fn unknown_tags_fall_back() {
		let obj = Mapper::new().get_object(&serde_json::json!({ "objectType": "glorbnok", "id": "x", "displayName": "???" })).unwrap();
		assert!(matches!(obj, Object::Unknown(_)));
		assert_eq!(obj.object_type(), "glorbnok");
		assert_eq!(obj.id(), "x");
		assert_eq!(obj.display_name(), Some("???"));
	}

	#[test]
	fn unknown_tags_keep_their_spelling() {
		let obj = Mapper::new().get_object(&serde_json::json!({ "objectType": "Glorbnok" })).unwrap();
		assert_eq!(obj.object_type(), "Glorbnok");
		assert_eq!(obj.id(), "");
	}

	#[test]
	fn tags_are_case_insensitive() {
		let obj = Mapper::new().get_object(&serde_json::json!({ "objectType": "PERSON", "id": "acct:alice@pump.example" })).unwrap();
		assert!(matches!(obj, Object::Person(_)));
		assert_eq!(obj.object_type(), "person");
	}

	#[test]
	fn missing_required_id_is_an_error() {
		let err = Mapper::new().get_object(&serde_json::json!({ "objectType": "person" })).unwrap_err();
		assert!(matches!(err, crate::PumpError::Deserialization(actstream::FieldErr("id"))));
	}

	#[test]
	fn non_objects_are_malformed() {
		assert!(matches!(
			Mapper::new().get_object(&serde_json::json!("acct:alice@pump.example")),
			Err(crate::PumpError::Malformed(_))
		));
	}

	#[test]
	fn service_and_registered_aliases() {
		let mut mapper = Mapper::new();
		assert_eq!(mapper.resolve("service"), Some(ObjectType::Application));
		assert_eq!(mapper.resolve("status"), None);
		mapper.register("Status", ObjectType::Note);
		let obj = mapper.get_object(&serde_json::json!({ "objectType": "status", "id": "s" })).unwrap();
		assert!(matches!(obj, Object::Note(_)));
	}

	#[test]
	fn feed_items_get_implicit_type_and_bad_ones_are_skipped() {
		let mapper = Mapper::new();
		let objects = mapper.get_objects(vec![
			serde_json::json!({ "id": "https://pump.example/api/activity/1", "verb": "post" }),
			serde_json::json!({ "objectType": "person" }),
			serde_json::json!("garbage"),
			serde_json::json!({ "objectType": "note", "id": "n" }),
		], Some("activity"));
		assert_eq!(objects.len(), 2);
		assert!(matches!(objects[0], Object::Activity(_)));
		assert!(matches!(objects[1], Object::Note(_)));
	}

	#[test]
	fn configured_link_keys_are_extracted() {
		let mapper = Mapper::with_config(&MapperConfig { extra_link_keys: vec!["inbox".into()] });
		let obj = mapper.get_object(&serde_json::json!({
			"objectType": "person",
			"id": "acct:alice@pump.example",
			"inbox": { "url": "https://pump.example/api/user/alice/inbox" },
		})).unwrap();
		assert_eq!(obj.links().get("inbox"), Some("https://pump.example/api/user/alice/inbox"));
	}
}
