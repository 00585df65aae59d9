use crate::{getter, setter, strenum, Field, FieldErr};

strenum! {
	pub enum Verb {
		Post => "post",
		Update => "update",
		Delete => "delete",
		Share => "share",
		Unshare => "unshare",
		Favorite => "favorite",
		Unfavorite => "unfavorite",
		Like => "like",
		Unlike => "unlike",
		Follow => "follow",
		StopFollowing => "stop-following",
		Add => "add",
		Remove => "remove",
		Join => "join",
		Leave => "leave",
	};
}

pub trait Activity : super::Object {
	fn verb(&self) -> Field<&str> { Err(FieldErr("verb")) }
	fn actor(&self) -> Field<&serde_json::Value> { Err(FieldErr("actor")) }
	fn object(&self) -> Field<&serde_json::Value> { Err(FieldErr("object")) }
	fn target(&self) -> Field<&serde_json::Value> { Err(FieldErr("target")) }
	fn generator(&self) -> Field<&serde_json::Value> { Err(FieldErr("generator")) }
	/// when the server received the activity, as opposed to when it was published
	fn received(&self) -> Field<chrono::DateTime<chrono::Utc>> { Err(FieldErr("received")) }
}

pub trait ActivityMut : super::ObjectMut {
	fn set_verb(self, val: Option<&str>) -> Self;
	fn set_actor(self, val: Option<serde_json::Value>) -> Self;
	fn set_object(self, val: Option<serde_json::Value>) -> Self;
	fn set_target(self, val: Option<serde_json::Value>) -> Self;
}

impl Activity for serde_json::Value {
	getter! { verb -> &str }
	getter! { actor -> node }
	getter! { object -> node }
	getter! { target -> node }
	getter! { generator -> node }
	getter! { received -> chrono::DateTime<chrono::Utc> }
}

impl ActivityMut for serde_json::Value {
	setter! { verb -> &str }
	setter! { actor -> node }
	setter! { object -> node }
	setter! { target -> node }
}
