use actstream::{Field, Media as _, Object as _, OptionalString, Person as _};

use crate::{feed::Feed, Mapper};

use super::{place::Place, media::MediaLink, Merge, ObjectBase, Parse};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
	pub base: ObjectBase,
	pub preferred_username: Option<String>,
	pub location: Option<Place>,
	/// avatar
	pub image: Option<MediaLink>,
	/// whether the authenticated user follows them
	pub followed: Option<bool>,
	pub followers: Option<Feed>,
	pub following: Option<Feed>,
	pub favorites: Option<Feed>,
	pub lists: Option<Feed>,
}

impl Person {
	/// `user@host` form of the id, if it's an `acct:` uri
	pub fn webfinger(&self) -> Option<&str> {
		self.base.id.strip_prefix("acct:")
	}

	pub fn username(&self) -> Option<&str> {
		self.preferred_username
			.as_deref()
			.or_else(|| self.webfinger()?.split('@').next())
	}

	pub fn server(&self) -> Option<&str> {
		self.webfinger()?.split_once('@').map(|(_, host)| host)
	}
}

impl Parse for Person {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let feed = |x: Field<&serde_json::Value>| x.ok().map(|x| Feed::from_payload(x, mapper));
		Ok(Person {
			base: ObjectBase::parse(data, mapper, true)?,
			preferred_username: data.preferred_username().str(),
			location: data.location().ok().map(|x| Place::parse(x, mapper)).transpose()?,
			image: data.image().ok().and_then(MediaLink::parse),
			followed: data.followed().ok(),
			followers: feed(data.followers()),
			following: feed(data.following()),
			favorites: feed(data.favorites()),
			lists: feed(data.lists()),
		})
	}
}

impl Merge for Person {
	fn merge(self, newer: Self) -> Self {
		Person {
			base: self.base.merge(newer.base),
			preferred_username: newer.preferred_username.or(self.preferred_username),
			location: self.location.merge(newer.location),
			image: newer.image.or(self.image),
			followed: newer.followed.or(self.followed),
			followers: self.followers.merge(newer.followers),
			following: self.following.merge(newer.following),
			favorites: self.favorites.merge(newer.favorites),
			lists: self.lists.merge(newer.lists),
		}
	}
}
