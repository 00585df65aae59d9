pub mod activity;
pub mod collection;
pub mod media;
pub mod person;
pub mod place;

use crate::{getter, setter, strenum, Base, BaseMut, Field, FieldErr};

strenum! {
	pub enum ObjectType {
		Person => "person",
		Note => "note",
		Comment => "comment",
		Image => "image",
		Video => "video",
		Audio => "audio",
		Collection => "collection",
		Place => "place",
		Activity => "activity",
		Application => "application",
		Service => "service",
	};
}

pub trait Object : Base {
	/// A simple, human-readable, plain-text name for the object
	fn display_name(&self) -> Field<&str> { Err(FieldErr("displayName")) }
	/// HTML content of the object
	fn content(&self) -> Field<&str> { Err(FieldErr("content")) }
	fn summary(&self) -> Field<&str> { Err(FieldErr("summary")) }
	/// Canonical web representation of this object, as opposed to its api id
	fn url(&self) -> Field<&str> { Err(FieldErr("url")) }
	fn published(&self) -> Field<chrono::DateTime<chrono::Utc>> { Err(FieldErr("published")) }
	fn updated(&self) -> Field<chrono::DateTime<chrono::Utc>> { Err(FieldErr("updated")) }
	/// Set by the server on tombstones: the object is still served, just emptied
	fn deleted(&self) -> Field<chrono::DateTime<chrono::Utc>> { Err(FieldErr("deleted")) }
	fn author(&self) -> Field<&serde_json::Value> { Err(FieldErr("author")) }
	fn in_reply_to(&self) -> Field<&serde_json::Value> { Err(FieldErr("inReplyTo")) }
	fn location(&self) -> Field<&serde_json::Value> { Err(FieldErr("location")) }
	/// The `links` map, every entry being `{ "href": ... }`
	fn links(&self) -> Field<&serde_json::Value> { Err(FieldErr("links")) }
	fn likes(&self) -> Field<&serde_json::Value> { Err(FieldErr("likes")) }
	fn replies(&self) -> Field<&serde_json::Value> { Err(FieldErr("replies")) }
	fn shares(&self) -> Field<&serde_json::Value> { Err(FieldErr("shares")) }
	/// Whether the authenticated user favorited this object
	fn liked(&self) -> Field<bool> { Err(FieldErr("liked")) }
	fn to(&self) -> Vec<&serde_json::Value> { Vec::new() }
	fn cc(&self) -> Vec<&serde_json::Value> { Vec::new() }
	fn bto(&self) -> Vec<&serde_json::Value> { Vec::new() }
	fn bcc(&self) -> Vec<&serde_json::Value> { Vec::new() }

	/// pump.io extension: same-origin proxy for cross-origin resources
	fn proxy_url(&self) -> Field<&str> { Err(FieldErr("proxyURL")) }
}

pub trait ObjectMut : BaseMut {
	fn set_display_name(self, val: Option<&str>) -> Self;
	fn set_content(self, val: Option<&str>) -> Self;
	fn set_summary(self, val: Option<&str>) -> Self;
	fn set_author(self, val: Option<serde_json::Value>) -> Self;
	fn set_in_reply_to(self, val: Option<serde_json::Value>) -> Self;
	fn set_to(self, val: Vec<serde_json::Value>) -> Self;
	fn set_cc(self, val: Vec<serde_json::Value>) -> Self;
}

impl Object for serde_json::Value {
	getter! { display_name::displayName -> &str }
	getter! { content -> &str }
	getter! { summary -> &str }
	getter! { url -> &str }
	getter! { published -> chrono::DateTime<chrono::Utc> }
	getter! { updated -> chrono::DateTime<chrono::Utc> }
	getter! { deleted -> chrono::DateTime<chrono::Utc> }
	getter! { author -> node }
	getter! { in_reply_to::inReplyTo -> node }
	getter! { location -> node }
	getter! { links -> node }
	getter! { likes -> node }
	getter! { replies -> node }
	getter! { shares -> node }
	getter! { liked -> bool }
	getter! { to -> array }
	getter! { cc -> array }
	getter! { bto -> array }
	getter! { bcc -> array }

	fn proxy_url(&self) -> Field<&str> {
		self.get("pump_io")
			.and_then(|x| x.get("proxyURL"))
			.and_then(|x| x.as_str())
			.ok_or(FieldErr("proxyURL"))
	}
}

impl ObjectMut for serde_json::Value {
	setter! { display_name::displayName -> &str }
	setter! { content -> &str }
	setter! { summary -> &str }
	setter! { author -> node }
	setter! { in_reply_to::inReplyTo -> node }
	setter! { to -> array }
	setter! { cc -> array }
}

#[cfg(test)]
mod test {
	use super::{Object, ObjectType};
	use crate::Base;

	#[test]
	fn object_type_parses_regardless_of_case() {
		assert_eq!(ObjectType::try_from("Person").ok(), Some(ObjectType::Person));
		assert_eq!(ObjectType::try_from("NOTE").ok(), Some(ObjectType::Note));
		assert!(ObjectType::try_from("glorbnok").is_err());
		assert_eq!(ObjectType::Image.as_ref(), "image");
	}

	#[test]
	fn getters_read_pump_field_names() {
		let note = serde_json::json!({
			"id": "https://pump.example/api/note/abc",
			"objectType": "note",
			"displayName": "hi",
			"content": "hello world!",
			"published": "2024-06-04T17:09:20+00:00",
			"pump_io": { "proxyURL": "https://pump.example/api/proxy/xyz" },
			"to": [{ "id": "acct:bob@pump.example", "objectType": "person" }],
		});

		assert_eq!(note.id().ok(), Some("https://pump.example/api/note/abc"));
		assert_eq!(note.object_type().ok(), Some("note"));
		assert_eq!(note.display_name().ok(), Some("hi"));
		assert_eq!(note.content().ok(), Some("hello world!"));
		assert_eq!(note.proxy_url().ok(), Some("https://pump.example/api/proxy/xyz"));
		assert!(note.published().is_ok());
		assert_eq!(note.to().len(), 1);
		assert!(note.cc().is_empty());
		assert_eq!(note.summary().err(), Some(crate::FieldErr("summary")));
	}
}
