use crate::{getter, Field, FieldErr};

/// Images, videos, audio files and avatars: objects pointing at binary resources
pub trait Media : super::Object {
	/// thumbnail, or avatar when found on a person
	fn image(&self) -> Field<&serde_json::Value> { Err(FieldErr("image")) }
	fn full_image(&self) -> Field<&serde_json::Value> { Err(FieldErr("fullImage")) }
	/// playable resource of videos and audio files
	fn stream(&self) -> Field<&serde_json::Value> { Err(FieldErr("stream")) }
	fn width(&self) -> Field<u64> { Err(FieldErr("width")) }
	fn height(&self) -> Field<u64> { Err(FieldErr("height")) }
}

impl Media for serde_json::Value {
	getter! { image -> node }
	getter! { full_image::fullImage -> node }
	getter! { stream -> node }
	getter! { width -> u64 }
	getter! { height -> u64 }
}
