#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing field '{0}'")]
pub struct FieldErr(pub &'static str);

pub type Field<T> = Result<T, FieldErr>;


pub trait OptionalString {
	fn str(self) -> Option<String>;
}

impl OptionalString for Field<&str> {
	fn str(self) -> Option<String> {
		self.ok().map(|x| x.to_string())
	}
}
