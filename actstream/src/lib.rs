mod macros;
pub(crate) use macros::{strenum, getter, setter};
pub use macros::{set_maybe_value, TypeValueError};

pub mod field;
pub use field::{Field, FieldErr, OptionalString};

mod base;
pub use base::{Base, BaseMut};

mod object;
pub use object::{
	Object, ObjectMut, ObjectType,
	activity::{Activity, ActivityMut, Verb},
	collection::Collection,
	media::Media,
	person::Person,
	place::Place,
};

pub mod target;
pub use target::PUBLIC;

#[cfg(feature = "shortcuts")]
mod shortcuts;
#[cfg(feature = "shortcuts")]
pub use shortcuts::link_url;
