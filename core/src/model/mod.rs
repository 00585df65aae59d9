pub mod activity;
pub mod collection;
pub mod media;
pub mod note;
pub mod person;
pub mod place;

pub use activity::Activity;
pub use collection::Collection;
pub use media::{Media, MediaKind, MediaLink};
pub use note::Note;
pub use person::Person;
pub use place::Place;

use actstream::{Base, Field, Object as _, OptionalString};

use crate::{links::LinkTable, Mapper};

/// Build `Self` from a payload, without touching any previous state
pub trait Parse : Sized {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self>;
}

/// Combine an older and a newer view of the same thing: whatever `newer` carries wins,
/// whatever it lacks is kept from `self`
pub trait Merge {
	fn merge(self, newer: Self) -> Self;
}

/// In-place refresh from a payload, for objects that get more complete as more data arrives
pub trait Unserialize : Parse + Merge + Default {
	fn unserialize(&mut self, data: &serde_json::Value, mapper: &Mapper) -> Field<&mut Self> {
		let newer = Self::parse(data, mapper)?;
		*self = std::mem::take(self).merge(newer);
		Ok(self)
	}
}

impl<T: Parse + Merge + Default> Unserialize for T {}

impl<T: Merge> Merge for Option<T> {
	fn merge(self, newer: Self) -> Self {
		match (self, newer) {
			(Some(old), Some(new)) => Some(old.merge(new)),
			(old, None) => old,
			(None, new) => new,
		}
	}
}

impl<T: Merge> Merge for Box<T> {
	fn merge(self, newer: Self) -> Self {
		Box::new((*self).merge(*newer))
	}
}

/// Fields every object carries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectBase {
	pub id: String,
	pub object_type: String,
	pub links: LinkTable,
	pub display_name: Option<String>,
	pub content: Option<String>,
	pub summary: Option<String>,
	pub url: Option<String>,
	pub published: Option<chrono::DateTime<chrono::Utc>>,
	pub updated: Option<chrono::DateTime<chrono::Utc>>,
	pub deleted: Option<chrono::DateTime<chrono::Utc>>,
	pub author: Option<Box<Object>>,
}

impl ObjectBase {
	/// parse common fields, `id` is only mandatory for kinds that can't live without one
	pub fn parse(data: &serde_json::Value, mapper: &Mapper, require_id: bool) -> Field<Self> {
		let id = match data.id() {
			Ok(id) => id.to_string(),
			Err(e) if require_id => return Err(e),
			Err(_) => String::new(),
		};

		let author = match data.author() {
			Ok(author) => Some(Box::new(mapper.parse(author)?)),
			Err(_) => None,
		};

		Ok(ObjectBase {
			id,
			object_type: data.object_type().unwrap_or_default().to_lowercase(),
			links: LinkTable::extract(data, mapper.extra_link_keys(), "href"),
			display_name: data.display_name().str(),
			content: data.content().str(),
			summary: data.summary().str(),
			url: data.url().str(),
			published: data.published().ok(),
			updated: data.updated().ok(),
			deleted: data.deleted().ok(),
			author,
		})
	}

	/// `{ id, objectType }` stub, how activities refer to objects
	pub fn reference(&self) -> serde_json::Value {
		actstream::target::recipient(&self.id, &self.object_type)
	}
}

impl Merge for ObjectBase {
	fn merge(self, newer: Self) -> Self {
		ObjectBase {
			id: if newer.id.is_empty() { self.id } else { newer.id },
			object_type: if newer.object_type.is_empty() { self.object_type } else { newer.object_type },
			links: self.links.merge(newer.links),
			display_name: newer.display_name.or(self.display_name),
			content: newer.content.or(self.content),
			summary: newer.summary.or(self.summary),
			url: newer.url.or(self.url),
			published: newer.published.or(self.published),
			updated: newer.updated.or(self.updated),
			deleted: newer.deleted.or(self.deleted),
			author: self.author.merge(newer.author),
		}
	}
}

/// Objects nobody taught us about: kept around with whatever common fields they have
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unknown {
	pub base: ObjectBase,
}

impl Parse for Unknown {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let mut base = ObjectBase::parse(data, mapper, false)?;
		// keep the tag exactly as the server spelled it
		base.object_type = data.object_type().unwrap_or_default().to_string();
		Ok(Unknown { base })
	}
}

impl Merge for Unknown {
	fn merge(self, newer: Self) -> Self {
		Unknown { base: self.base.merge(newer.base) }
	}
}

/// Generators and services: whatever produced an activity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Application {
	pub base: ObjectBase,
}

impl Parse for Application {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		Ok(Application { base: ObjectBase::parse(data, mapper, false)? })
	}
}

impl Merge for Application {
	fn merge(self, newer: Self) -> Self {
		Application { base: self.base.merge(newer.base) }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
	Person(Person),
	Note(Note),
	Comment(Note),
	Image(Media),
	Video(Media),
	Audio(Media),
	Collection(Collection),
	Place(Place),
	Activity(Activity),
	Application(Application),
	Unknown(Unknown),
}

impl Default for Object {
	fn default() -> Self {
		Object::Unknown(Unknown::default())
	}
}

macro_rules! each_variant {
	($obj:expr, $x:ident => $body:expr) => {
		match $obj {
			Object::Person($x) => $body,
			Object::Note($x) | Object::Comment($x) => $body,
			Object::Image($x) | Object::Video($x) | Object::Audio($x) => $body,
			Object::Collection($x) => $body,
			Object::Place($x) => $body,
			Object::Activity($x) => $body,
			Object::Application($x) => $body,
			Object::Unknown($x) => $body,
		}
	};
}

impl Object {
	pub fn base(&self) -> &ObjectBase {
		each_variant!(self, x => &x.base)
	}

	pub fn base_mut(&mut self) -> &mut ObjectBase {
		each_variant!(self, x => &mut x.base)
	}

	pub fn id(&self) -> &str {
		&self.base().id
	}

	pub fn object_type(&self) -> &str {
		&self.base().object_type
	}

	pub fn links(&self) -> &LinkTable {
		&self.base().links
	}

	pub fn display_name(&self) -> Option<&str> {
		self.base().display_name.as_deref()
	}

	pub fn content(&self) -> Option<&str> {
		self.base().content.as_deref()
	}

	pub fn author(&self) -> Option<&Object> {
		self.base().author.as_deref()
	}

	pub fn is_deleted(&self) -> bool {
		self.base().deleted.is_some()
	}

	pub fn reference(&self) -> serde_json::Value {
		self.base().reference()
	}

	pub fn as_person(&self) -> Option<&Person> {
		match self {
			Object::Person(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_note(&self) -> Option<&Note> {
		match self {
			Object::Note(x) | Object::Comment(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_media(&self) -> Option<&Media> {
		match self {
			Object::Image(x) | Object::Video(x) | Object::Audio(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_collection(&self) -> Option<&Collection> {
		match self {
			Object::Collection(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
		match self {
			Object::Collection(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_activity(&self) -> Option<&Activity> {
		match self {
			Object::Activity(x) => Some(x),
			_ => None,
		}
	}
}

impl Parse for Object {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		mapper.parse(data)
	}
}

impl Merge for Object {
	fn merge(self, newer: Self) -> Self {
		// a different object altogether just replaces this one
		if !newer.id().is_empty() && !self.id().is_empty() && newer.id() != self.id() {
			return newer;
		}
		match (self, newer) {
			(Object::Person(a), Object::Person(b)) => Object::Person(a.merge(b)),
			(Object::Note(a), Object::Note(b)) => Object::Note(a.merge(b)),
			(Object::Comment(a), Object::Comment(b)) => Object::Comment(a.merge(b)),
			(Object::Image(a), Object::Image(b)) => Object::Image(a.merge(b)),
			(Object::Video(a), Object::Video(b)) => Object::Video(a.merge(b)),
			(Object::Audio(a), Object::Audio(b)) => Object::Audio(a.merge(b)),
			(Object::Collection(a), Object::Collection(b)) => Object::Collection(a.merge(b)),
			(Object::Place(a), Object::Place(b)) => Object::Place(a.merge(b)),
			(Object::Activity(a), Object::Activity(b)) => Object::Activity(a.merge(b)),
			(Object::Application(a), Object::Application(b)) => Object::Application(a.merge(b)),
			(Object::Unknown(a), Object::Unknown(b)) => Object::Unknown(a.merge(b)),
			(_, newer) => newer,
		}
	}
}

/// ids of `to`/`cc` style addressing arrays
pub(crate) fn ids(values: Vec<&serde_json::Value>) -> Vec<String> {
	values
		.into_iter()
		.filter_map(|x| Some(x.id().ok()?.to_string()))
		.collect()
}
