use crate::{getter, Field, FieldErr};

pub trait Collection : super::Object {
	fn total_items(&self) -> Field<u64> { Err(FieldErr("totalItems")) }
	fn items(&self) -> Vec<&serde_json::Value> { Vec::new() }
	/// types of the items, servers often omit `objectType` on every item when this is set
	fn object_types(&self) -> Vec<&serde_json::Value> { Vec::new() }
	fn members(&self) -> Field<&serde_json::Value> { Err(FieldErr("members")) }
}

impl Collection for serde_json::Value {
	getter! { total_items::totalItems -> u64 }
	getter! { items -> array }
	getter! { object_types::objectTypes -> array }
	getter! { members -> node }
}
