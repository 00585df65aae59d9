#[derive(Debug, thiserror::Error)]
#[error("invalid type value")]
pub struct TypeValueError;

macro_rules! strenum {
	( $(pub enum $enum_name:ident { $($variant:ident => $value:literal),* $(,)? };)+ ) => {
		$(
			#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
			pub enum $enum_name {
				$($variant,)*
			}

			impl AsRef<str> for $enum_name {
				fn as_ref(&self) -> &str {
					match self {
						$(Self::$variant => $value,)*
					}
				}
			}

			impl std::fmt::Display for $enum_name {
				fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
					f.write_str(self.as_ref())
				}
			}

			// wire values are lowercase but servers are not always consistent about it
			impl TryFrom<&str> for $enum_name {
				type Error = $crate::macros::TypeValueError;

				fn try_from(value: &str) -> Result<Self, Self::Error> {
					$(
						if value.eq_ignore_ascii_case($value) {
							return Ok(Self::$variant);
						}
					)*
					Err($crate::macros::TypeValueError)
				}
			}
		)*
	};
}

pub(crate) use strenum;

macro_rules! getter {
	($name:ident -> type) => {
		fn $name(&self) -> $crate::Field<&str> {
			self.get("objectType")
				.and_then(|x| x.as_str())
				.ok_or($crate::FieldErr("objectType"))
		}
	};

	($name:ident -> &str) => {
		fn $name(&self) -> $crate::Field<&str> {
			self.get(stringify!($name))
				.and_then(|x| x.as_str())
				.ok_or($crate::FieldErr(stringify!($name)))
		}
	};

	($name:ident::$rename:ident -> &str) => {
		fn $name(&self) -> $crate::Field<&str> {
			self.get(stringify!($rename))
				.and_then(|x| x.as_str())
				.ok_or($crate::FieldErr(stringify!($rename)))
		}
	};

	($name:ident -> bool) => {
		fn $name(&self) -> $crate::Field<bool> {
			self.get(stringify!($name))
				.and_then(|x| x.as_bool())
				.ok_or($crate::FieldErr(stringify!($name)))
		}
	};

	($name:ident -> u64) => {
		fn $name(&self) -> $crate::Field<u64> {
			self.get(stringify!($name))
				.and_then(|x| x.as_u64())
				.ok_or($crate::FieldErr(stringify!($name)))
		}
	};

	($name:ident::$rename:ident -> u64) => {
		fn $name(&self) -> $crate::Field<u64> {
			self.get(stringify!($rename))
				.and_then(|x| x.as_u64())
				.ok_or($crate::FieldErr(stringify!($rename)))
		}
	};

	($name:ident -> chrono::DateTime<chrono::Utc>) => {
		fn $name(&self) -> $crate::Field<chrono::DateTime<chrono::Utc>> {
			let raw = self.get(stringify!($name))
				.and_then(|x| x.as_str())
				.ok_or($crate::FieldErr(stringify!($name)))?;
			Ok(
				chrono::DateTime::parse_from_rfc3339(raw)
					.map_err(|_| $crate::FieldErr(stringify!($name)))?
					.with_timezone(&chrono::Utc)
			)
		}
	};

	($name:ident -> node) => {
		fn $name(&self) -> $crate::Field<&serde_json::Value> {
			self.get(stringify!($name))
				.filter(|x| x.is_object())
				.ok_or($crate::FieldErr(stringify!($name)))
		}
	};

	($name:ident::$rename:ident -> node) => {
		fn $name(&self) -> $crate::Field<&serde_json::Value> {
			self.get(stringify!($rename))
				.filter(|x| x.is_object())
				.ok_or($crate::FieldErr(stringify!($rename)))
		}
	};

	($name:ident -> array) => {
		fn $name(&self) -> Vec<&serde_json::Value> {
			match self.get(stringify!($name)) {
				Some(serde_json::Value::Array(arr)) => arr.iter().collect(),
				Some(serde_json::Value::Null) | None => Vec::new(),
				Some(x) => vec![x],
			}
		}
	};

	($name:ident::$rename:ident -> array) => {
		fn $name(&self) -> Vec<&serde_json::Value> {
			match self.get(stringify!($rename)) {
				Some(serde_json::Value::Array(arr)) => arr.iter().collect(),
				Some(serde_json::Value::Null) | None => Vec::new(),
				Some(x) => vec![x],
			}
		}
	};
}

pub(crate) use getter;

macro_rules! setter {
	($name:ident -> type) => {
		paste::item! {
			fn [< set_$name >](mut self, val: Option<&str>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, "objectType", val.map(|x| serde_json::Value::String(x.to_string()))
				);
				self
			}
		}
	};

	($name:ident -> &str) => {
		paste::item! {
			fn [< set_$name >](mut self, val: Option<&str>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($name), val.map(|x| serde_json::Value::String(x.to_string()))
				);
				self
			}
		}
	};

	($name:ident::$rename:ident -> &str) => {
		paste::item! {
			fn [< set_$name >](mut self, val: Option<&str>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($rename), val.map(|x| serde_json::Value::String(x.to_string()))
				);
				self
			}
		}
	};

	($name:ident -> node) => {
		paste::item! {
			fn [< set_$name >](mut self, val: Option<serde_json::Value>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($name), val
				);
				self
			}
		}
	};

	($name:ident::$rename:ident -> node) => {
		paste::item! {
			fn [< set_$name >](mut self, val: Option<serde_json::Value>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($rename), val
				);
				self
			}
		}
	};

	($name:ident -> array) => {
		paste::item! {
			fn [< set_$name >](mut self, val: Vec<serde_json::Value>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($name),
					if val.is_empty() { None } else { Some(serde_json::Value::Array(val)) },
				);
				self
			}
		}
	};
}

pub(crate) use setter;

pub fn set_maybe_value(obj: &mut serde_json::Value, key: &str, value: Option<serde_json::Value>) {
	if let Some(map) = obj.as_object_mut() {
		match value {
			Some(x) => map.insert(key.to_string(), x),
			None => map.remove(key),
		};
	} else {
		tracing::error!("error setting '{key}' on json Value: not an object");
	}
}
