pub mod items;

pub use items::{Anchor, ItemList, Limit, Query};

use std::ops::{Bound, RangeBounds};

use actstream::{Collection as _, Field, Object as _, OptionalString};

use crate::{links::LinkTable, model::{Merge, Parse}, Mapper, Object, Pump, PumpError, PumpResult, UsageError};

/// A remote collection, walked lazily page by page.
///
/// Items seen while walking the feed from its head are kept in a local cache: once the cache holds
/// `total_items` entries (or the feed has no url to fetch from) the feed is fully cached and every
/// query is answered locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
	/// where the first page lives
	pub url: Option<String>,
	pub display_name: Option<String>,
	pub object_types: Vec<String>,
	pub author: Option<Box<Object>>,
	pub total_items: Option<u64>,
	pub links: LinkTable,
	items: Option<Vec<Object>>,
}

impl Feed {
	pub fn new(url: impl Into<String>) -> Self {
		Feed {
			url: Some(url.into()),
			..Default::default()
		}
	}

	/// Lenient: feeds are never required fields, so anything missing or malformed is just left empty
	pub fn from_payload(data: &serde_json::Value, mapper: &Mapper) -> Self {
		let mut feed = Feed::metadata(data, mapper);
		if data.get("items").is_some() {
			let items = data.items().into_iter().cloned();
			feed.items = Some(mapper.get_objects(items, feed.implicit_type()));
		}
		feed
	}

	/// everything but the items
	fn metadata(data: &serde_json::Value, mapper: &Mapper) -> Self {
		let author = match data.author() {
			Ok(x) => match mapper.parse(x) {
				Ok(author) => Some(Box::new(author)),
				Err(e) => {
					tracing::debug!("ignoring malformed feed author: {e}");
					None
				},
			},
			Err(_) => None,
		};

		Feed {
			url: data.proxy_url().or_else(|_| data.url()).str(),
			display_name: data.display_name().str(),
			object_types: data.object_types()
				.into_iter()
				.filter_map(|x| x.as_str())
				.map(str::to_lowercase)
				.collect(),
			author,
			total_items: data.total_items().ok(),
			links: LinkTable::extract(data, mapper.extra_link_keys(), "href"),
			items: None,
		}
	}

	pub fn is_fully_cached(&self) -> bool {
		let cached = self.items.as_ref().map_or(0, Vec::len) as u64;
		match self.total_items {
			Some(total) => cached >= total,
			// nowhere to fetch more from
			None => self.items.is_some() && self.url.is_none(),
		}
	}

	pub fn cached(&self) -> &[Object] {
		self.items.as_deref().unwrap_or_default()
	}

	/// type given to items arriving without one
	pub fn implicit_type(&self) -> Option<&str> {
		self.object_types.first().map(String::as_str)
	}

	pub fn position(&self, id: &str) -> Option<usize> {
		self.cached().iter().position(|x| x.id() == id)
	}

	/// Forget cached items and counters, so the next query goes to the server
	pub fn invalidate(&mut self) {
		self.items = None;
		self.total_items = None;
	}

	/// Start a new session over this feed. Conflicting cursors, or cursors pointing outside
	/// the cache of a cached feed, are rejected here before any request is made.
	pub fn items<'a>(&'a mut self, pump: &'a Pump, query: Query) -> PumpResult<ItemList<'a>> {
		query.validate()?;
		if query.is_cached() || self.is_fully_cached() {
			for anchor in query.anchors() {
				if self.position(anchor.id()).is_none() {
					return Err(UsageError::NotCached(anchor.id().to_string()).into());
				}
			}
		}
		Ok(ItemList::new(self, pump, query))
	}

	/// The item at position `index`, counting from the head of the feed
	pub fn get(&mut self, pump: &Pump, index: usize) -> PumpResult<Object> {
		let mut session = self.items(pump, Query::new().offset(index).limit(1))?;
		match session.next() {
			Some(res) => res,
			None => Err(PumpError::Bounds(index)),
		}
	}

	/// Items in `range`; `step` is applied to the fetched items, servers know nothing about it
	pub fn slice(&mut self, pump: &Pump, range: impl RangeBounds<usize>, step: Option<usize>) -> PumpResult<Vec<Object>> {
		let step = step.unwrap_or(1);
		if step == 0 {
			return Err(UsageError::ZeroStep.into());
		}

		let start = match range.start_bound() {
			Bound::Included(x) => *x,
			Bound::Excluded(x) => x.saturating_add(1),
			Bound::Unbounded => 0,
		};
		let query = match range.end_bound() {
			Bound::Included(&usize::MAX) => Query::new().unbounded(),
			Bound::Included(x) => Query::new().limit((x + 1).saturating_sub(start)),
			Bound::Excluded(x) => Query::new().limit(x.saturating_sub(start)),
			Bound::Unbounded => Query::new().unbounded(),
		};

		let items = self
			.items(pump, query.offset(start))?
			.collect::<PumpResult<Vec<Object>>>()?;

		Ok(items.into_iter().step_by(step).collect())
	}

	/// Every item, following pages until the server runs out
	pub fn iter<'a>(&'a mut self, pump: &'a Pump) -> ItemList<'a> {
		ItemList::new(self, pump, Query::new().unbounded())
	}

	/// only "major" activities (posts, shares...) of an inbox or outbox
	pub fn major(&self) -> Option<Feed> {
		self.sub_feed("major")
	}

	/// only "minor" activities (likes, follows...) of an inbox or outbox
	pub fn minor(&self) -> Option<Feed> {
		self.sub_feed("minor")
	}

	/// only activities addressed directly to the owner
	pub fn direct(&self) -> Option<Feed> {
		self.sub_feed("direct")
	}

	fn sub_feed(&self, name: &str) -> Option<Feed> {
		let url = self.url.as_deref()?;
		let mut feed = Feed::new(format!("{}/{name}", url.trim_end_matches('/')));
		feed.object_types = self.object_types.clone();
		Some(feed)
	}

	/// Merge a fetched page into this feed, returning the links the page itself carried.
	/// Items are left to the caller, and the feed url keeps pointing at the head.
	pub(crate) fn absorb_page(&mut self, page: &serde_json::Value, mapper: &Mapper) -> LinkTable {
		let mut meta = Feed::metadata(page, mapper);
		meta.url = None;
		let links = meta.links.clone();
		*self = std::mem::take(self).merge(meta);
		links
	}

	/// store an item seen at `position`, extending the cache only when contiguous
	pub(crate) fn cache_at(&mut self, position: usize, item: Object) {
		let items = self.items.get_or_insert_with(Vec::new);
		if position < items.len() {
			items[position] = item;
		} else if position == items.len() {
			items.push(item);
		}
	}
}

impl Parse for Feed {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		Ok(Feed::from_payload(data, mapper))
	}
}

impl Merge for Feed {
	fn merge(self, newer: Self) -> Self {
		Feed {
			url: newer.url.or(self.url),
			display_name: newer.display_name.or(self.display_name),
			object_types: if newer.object_types.is_empty() { self.object_types } else { newer.object_types },
			author: self.author.merge(newer.author),
			total_items: newer.total_items.or(self.total_items),
			links: self.links.merge(newer.links),
			items: newer.items.or(self.items),
		}
	}
}

#[cfg(test)]
pub(crate) mod test {
	use super::Feed;
	use crate::{model::Unserialize, transport::mock::MockTransport, Config, Mapper, Pump, PumpError, UsageError};

	pub(crate) fn pump(mock: &MockTransport) -> Pump {
		let mut cfg = Config::default();
		cfg.server.nickname = "alice".into();
		Pump::new(cfg, mock.clone())
	}

	pub(crate) fn notes(range: std::ops::Range<usize>) -> Vec<serde_json::Value> {
		range
			.map(|i| serde_json::json!({ "objectType": "note", "id": format!("i{i}") }))
			.collect()
	}

	/// feed with `cached` notes of `total` cached locally
	pub(crate) fn cached_feed(cached: usize, total: usize) -> Feed {
		Feed::from_payload(&serde_json::json!({
			"url": "https://pump.example/api/user/alice/feed",
			"totalItems": total,
			"items": notes(0..cached),
		}), &Mapper::new())
	}

	pub(crate) fn ids(objects: &[crate::Object]) -> Vec<&str> {
		objects.iter().map(|x| x.id()).collect()
	}

	#[test]
	fn payload_fields_and_proxy_url() {
		let feed = Feed::from_payload(&serde_json::json!({
			"displayName": "Followers",
			"url": "https://pump.example/api/user/alice/followers",
			"pump_io": { "proxyURL": "https://home.example/api/proxy/abc" },
			"objectTypes": ["Person"],
			"totalItems": 7,
			"author": { "objectType": "person", "id": "acct:alice@pump.example" },
			"links": { "next": { "href": "https://pump.example/api/user/alice/followers?before=x" } },
		}), &Mapper::new());

		assert_eq!(feed.url.as_deref(), Some("https://home.example/api/proxy/abc"));
		assert_eq!(feed.display_name.as_deref(), Some("Followers"));
		assert_eq!(feed.implicit_type(), Some("person"));
		assert_eq!(feed.total_items, Some(7));
		assert_eq!(feed.author.as_ref().map(|x| x.id()), Some("acct:alice@pump.example"));
		assert_eq!(feed.links.get("next"), Some("https://pump.example/api/user/alice/followers?before=x"));
		assert!(feed.cached().is_empty());
		assert!(!feed.is_fully_cached());
	}

	#[test]
	fn empty_payload_is_fine() {
		let mut feed = Feed::default();
		feed.unserialize(&serde_json::json!({}), &Mapper::new()).unwrap();
		assert_eq!(feed, Feed::default());
		assert!(!feed.is_fully_cached());
	}

	#[test]
	fn reunserialize_keeps_fuller_payload() {
		let mapper = Mapper::new();
		let mut feed = Feed::default();
		feed.unserialize(&serde_json::json!({
			"url": "https://pump.example/api/user/alice/inbox",
			"totalItems": 40,
			"links": { "next": { "href": "old" } },
		}), &mapper).unwrap();
		feed.unserialize(&serde_json::json!({
			"url": "https://pump.example/api/user/alice/inbox",
			"displayName": "Inbox",
			"objectTypes": ["activity"],
			"totalItems": 41,
			"links": { "next": { "href": "new" }, "prev": { "href": "newer" } },
			"items": [],
		}), &mapper).unwrap();

		assert_eq!(feed.total_items, Some(41));
		assert_eq!(feed.display_name.as_deref(), Some("Inbox"));
		assert_eq!(feed.links.get("next"), Some("new"));
		assert_eq!(feed.links.get("prev"), Some("newer"));
		assert_eq!(feed.implicit_type(), Some("activity"));
		assert!(feed.cached().is_empty());
	}

	#[test]
	fn fully_cached_rules() {
		assert!(cached_feed(3, 3).is_fully_cached());
		assert!(!cached_feed(20, 25).is_fully_cached());
		assert!(Feed::from_payload(&serde_json::json!({ "items": notes(0..2) }), &Mapper::new()).is_fully_cached());
		assert!(!Feed::from_payload(&serde_json::json!({ "url": "x", "items": notes(0..2) }), &Mapper::new()).is_fully_cached());
		assert!(Feed::from_payload(&serde_json::json!({ "url": "x", "totalItems": 0 }), &Mapper::new()).is_fully_cached());
	}

	#[test]
	fn slice_then_step() {
		let mock = MockTransport::default();
		let pump = pump(&mock);
		let mut feed = cached_feed(12, 12);
		let items = feed.slice(&pump, 0..10, Some(2)).unwrap();
		assert_eq!(ids(&items), ["i0", "i2", "i4", "i6", "i8"]);
		assert_eq!(ids(&feed.slice(&pump, 3..=5, None).unwrap()), ["i3", "i4", "i5"]);
		assert_eq!(ids(&feed.slice(&pump, 10.., None).unwrap()), ["i10", "i11"]);
		assert!(feed.slice(&pump, 5..5, None).unwrap().is_empty());
		assert_eq!(mock.count(), 0);
	}

	#[test]
	fn slice_up_to_the_largest_index_takes_everything() {
		let mock = MockTransport::default();
		let pump = pump(&mock);
		let mut feed = cached_feed(3, 3);
		assert_eq!(ids(&feed.slice(&pump, 0..=usize::MAX, None).unwrap()), ["i0", "i1", "i2"]);
		assert_eq!(ids(&feed.slice(&pump, 1..=usize::MAX, Some(2)).unwrap()), ["i1"]);
		let from_max = (std::ops::Bound::Excluded(usize::MAX), std::ops::Bound::Unbounded);
		assert!(feed.slice(&pump, from_max, None).unwrap().is_empty());
		assert_eq!(mock.count(), 0);
	}

	#[test]
	fn slice_over_the_network_sends_offset_and_count() {
		let mock = MockTransport::default();
		mock.respond(serde_json::json!({ "items": notes(4..10) }));
		let pump = pump(&mock);
		let mut feed = Feed::new("https://pump.example/api/user/alice/feed");
		let items = feed.slice(&pump, 4..10, Some(3)).unwrap();
		assert_eq!(ids(&items), ["i4", "i7"]);

		let requests = mock.requests();
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].params.get("offset").map(String::as_str), Some("4"));
		assert_eq!(requests[0].params.get("count").map(String::as_str), Some("6"));
	}

	#[test]
	fn zero_step_is_rejected() {
		let mock = MockTransport::default();
		let err = cached_feed(3, 3).slice(&pump(&mock), 0..3, Some(0)).unwrap_err();
		assert!(matches!(err, PumpError::Usage(UsageError::ZeroStep)));
	}

	#[test]
	fn index_access() {
		let mock = MockTransport::default();
		let pump = pump(&mock);
		let mut feed = cached_feed(5, 5);
		assert_eq!(feed.get(&pump, 3).unwrap().id(), "i3");
		assert!(matches!(feed.get(&pump, 5), Err(PumpError::Bounds(5))));
		assert_eq!(mock.count(), 0);
	}

	#[test]
	fn index_beyond_remote_pages_is_a_bounds_error() {
		let mock = MockTransport::default();
		mock.respond(serde_json::json!({ "totalItems": 3, "items": [] }));
		let pump = pump(&mock);
		let mut feed = Feed::new("api/user/alice/inbox");
		let err = feed.get(&pump, 40).unwrap_err();
		assert!(err.is_bounds());
		assert_eq!(mock.requests()[0].params.get("offset").map(String::as_str), Some("40"));
		assert_eq!(mock.requests()[0].params.get("count").map(String::as_str), Some("1"));
	}

	#[test]
	fn sub_feeds() {
		let inbox = Feed {
			object_types: vec!["activity".into()],
			..Feed::new("api/user/alice/inbox/")
		};
		assert_eq!(inbox.major().and_then(|x| x.url).as_deref(), Some("api/user/alice/inbox/major"));
		assert_eq!(inbox.minor().and_then(|x| x.url).as_deref(), Some("api/user/alice/inbox/minor"));
		let direct_major = inbox.direct().and_then(|x| x.major()).unwrap();
		assert_eq!(direct_major.url.as_deref(), Some("api/user/alice/inbox/direct/major"));
		assert_eq!(direct_major.implicit_type(), Some("activity"));
		assert!(Feed::default().major().is_none());
	}

	#[test]
	fn invalidated_feeds_go_back_to_the_server() {
		let mut feed = cached_feed(3, 3);
		feed.invalidate();
		assert!(!feed.is_fully_cached());
		assert!(feed.cached().is_empty());
	}
}
