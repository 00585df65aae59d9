use crate::{getter, Field, FieldErr};

pub trait Place : super::Object {
	/// ISO 6709 position string, like `+27.5916+086.5640+8850/`
	fn position(&self) -> Field<&str> { Err(FieldErr("position")) }
	fn address(&self) -> Field<&serde_json::Value> { Err(FieldErr("address")) }
}

impl Place for serde_json::Value {
	getter! { position -> &str }
	getter! { address -> node }
}
