use crate::{getter, Field, FieldErr};

pub trait Person : super::Object {
	fn preferred_username(&self) -> Field<&str> { Err(FieldErr("preferredUsername")) }
	fn followers(&self) -> Field<&serde_json::Value> { Err(FieldErr("followers")) }
	fn following(&self) -> Field<&serde_json::Value> { Err(FieldErr("following")) }
	fn favorites(&self) -> Field<&serde_json::Value> { Err(FieldErr("favorites")) }
	fn lists(&self) -> Field<&serde_json::Value> { Err(FieldErr("lists")) }
	/// pump.io extension: whether the authenticated user follows this person
	fn followed(&self) -> Field<bool> { Err(FieldErr("followed")) }
}

impl Person for serde_json::Value {
	getter! { preferred_username::preferredUsername -> &str }
	getter! { followers -> node }
	getter! { following -> node }
	getter! { favorites -> node }
	getter! { lists -> node }

	fn followed(&self) -> Field<bool> {
		self.get("pump_io")
			.and_then(|x| x.get("followed"))
			.and_then(|x| x.as_bool())
			.ok_or(FieldErr("followed"))
	}
}
