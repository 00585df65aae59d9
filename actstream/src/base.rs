use crate::{Field, FieldErr};

pub trait Base {
	fn id(&self) -> Field<&str> { Err(FieldErr("id")) }
	/// raw `objectType` tag, as sent by the server
	fn object_type(&self) -> Field<&str> { Err(FieldErr("objectType")) }
}

pub trait BaseMut {
	fn set_id(self, val: Option<&str>) -> Self;
	fn set_object_type(self, val: Option<&str>) -> Self;
}


impl Base for String {
	fn id(&self) -> Field<&str> {
		Ok(self)
	}
}

impl Base for serde_json::Value {
	fn id(&self) -> Field<&str> {
		if self.is_string() {
			self.as_str().ok_or(FieldErr("id"))
		} else {
			self.get("id").and_then(|x| x.as_str()).ok_or(FieldErr("id"))
		}
	}

	crate::getter! { object_type -> type }
}

impl BaseMut for serde_json::Value {
	crate::setter! { id -> &str }
	crate::setter! { object_type -> type }
}
