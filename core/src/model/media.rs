use actstream::{Base, Field, Media as _, Object as _, ObjectType};

use crate::{feed::Feed, Mapper};

use super::{Merge, ObjectBase, Parse};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaKind {
	#[default]
	Image,
	Video,
	Audio,
}

/// Pointer to a binary resource, with its size when the server knows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink {
	pub url: String,
	pub width: Option<u64>,
	pub height: Option<u64>,
}

impl MediaLink {
	pub fn parse(data: &serde_json::Value) -> Option<Self> {
		Some(MediaLink {
			url: actstream::link_url(data).ok()?,
			width: data.width().ok(),
			height: data.height().ok(),
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
	pub base: ObjectBase,
	pub kind: MediaKind,
	/// thumbnail
	pub image: Option<MediaLink>,
	pub full_image: Option<MediaLink>,
	/// playable resource, for video and audio
	pub stream: Option<MediaLink>,
	pub liked: Option<bool>,
	pub replies: Option<Feed>,
	pub likes: Option<Feed>,
	pub shares: Option<Feed>,
}

impl Media {
	pub fn parse_kind(data: &serde_json::Value, mapper: &Mapper, kind: MediaKind) -> Field<Self> {
		let feed = |x: Field<&serde_json::Value>| x.ok().map(|x| Feed::from_payload(x, mapper));
		Ok(Media {
			base: ObjectBase::parse(data, mapper, true)?,
			kind,
			image: data.image().ok().and_then(MediaLink::parse),
			full_image: data.full_image().ok().and_then(MediaLink::parse),
			stream: data.stream().ok().and_then(MediaLink::parse),
			liked: data.liked().ok(),
			replies: feed(data.replies()),
			likes: feed(data.likes()),
			shares: feed(data.shares()),
		})
	}

	/// best resource to show: the full image if present, else the thumbnail
	pub fn best_url(&self) -> Option<&str> {
		self.full_image
			.as_ref()
			.or(self.image.as_ref())
			.or(self.stream.as_ref())
			.map(|x| x.url.as_str())
	}
}

impl Parse for Media {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let kind = match data.object_type().ok().and_then(|tag| mapper.resolve(tag)) {
			Some(ObjectType::Video) => MediaKind::Video,
			Some(ObjectType::Audio) => MediaKind::Audio,
			_ => MediaKind::Image,
		};
		Media::parse_kind(data, mapper, kind)
	}
}

impl Merge for Media {
	fn merge(self, newer: Self) -> Self {
		Media {
			base: self.base.merge(newer.base),
			kind: newer.kind,
			image: newer.image.or(self.image),
			full_image: newer.full_image.or(self.full_image),
			stream: newer.stream.or(self.stream),
			liked: newer.liked.or(self.liked),
			replies: self.replies.merge(newer.replies),
			likes: self.likes.merge(newer.likes),
			shares: self.shares.merge(newer.shares),
		}
	}
}
