use std::collections::VecDeque;

use actstream::Collection as _;

use crate::{config::TransportErrorPolicy, transport::{Method, Params}, Object, Pump, PumpResult, UsageError};

use super::Feed;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Limit {
	/// configured `pagination.page_size`
	#[default]
	PageSize,
	Count(usize),
	Unbounded,
}

/// Position in a feed, given as the id of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor(String);

impl Anchor {
	pub fn id(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Anchor {
	fn from(value: &str) -> Self {
		Anchor(value.to_string())
	}
}

impl From<String> for Anchor {
	fn from(value: String) -> Self {
		Anchor(value)
	}
}

impl From<&Object> for Anchor {
	fn from(value: &Object) -> Self {
		Anchor(value.id().to_string())
	}
}

/// What a single [ItemList] session should return
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	offset: Option<usize>,
	limit: Limit,
	since: Option<Anchor>,
	before: Option<Anchor>,
	cached: bool,
}

impl Query {
	pub fn new() -> Self {
		Query::default()
	}

	/// skip this many items from the head
	pub fn offset(mut self, offset: usize) -> Self {
		self.offset = Some(offset);
		self
	}

	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = Limit::Count(limit);
		self
	}

	pub fn unbounded(mut self) -> Self {
		self.limit = Limit::Unbounded;
		self
	}

	/// only items newer than `anchor`, oldest first
	pub fn since(mut self, anchor: impl Into<Anchor>) -> Self {
		self.since = Some(anchor.into());
		self
	}

	/// only items older than `anchor`, newest first
	pub fn before(mut self, anchor: impl Into<Anchor>) -> Self {
		self.before = Some(anchor.into());
		self
	}

	/// answer from the local cache only, even if it's incomplete
	pub fn cached(mut self) -> Self {
		self.cached = true;
		self
	}

	pub fn is_cached(&self) -> bool {
		self.cached
	}

	pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
		self.since.iter().chain(self.before.iter())
	}

	pub fn validate(&self) -> Result<(), UsageError> {
		if self.offset.is_some() && (self.since.is_some() || self.before.is_some()) {
			return Err(UsageError::OffsetWithCursor);
		}
		if self.since.is_some() && self.before.is_some() {
			return Err(UsageError::SinceWithBefore);
		}
		Ok(())
	}
}

/// Cursor parameters are sent with the first page only, later pages follow the feed links
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
	Unset,
	Pending(String),
	Consumed,
}

impl Cursor {
	fn pending(&self) -> Option<&str> {
		match self {
			Cursor::Pending(id) => Some(id),
			_ => None,
		}
	}

	fn is_set(&self) -> bool {
		!matches!(self, Cursor::Unset)
	}

	fn consume(&mut self) {
		if let Cursor::Pending(_) = self {
			*self = Cursor::Consumed;
		}
	}
}

impl From<Option<Anchor>> for Cursor {
	fn from(value: Option<Anchor>) -> Self {
		match value {
			Some(Anchor(id)) => Cursor::Pending(id),
			None => Cursor::Unset,
		}
	}
}

/// cached sessions hand out their selection once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheState {
	NotStarted,
	ServedFullCache,
	Exhausted,
}

/// One pass over a [Feed]: lazy, finite and not restartable.
///
/// Pages are requested only when the buffered ones run out. Holding the feed mutably, a session
/// can update its links and cache as pages arrive; a new session starts again from the query.
pub struct ItemList<'a> {
	feed: &'a mut Feed,
	pump: &'a Pump,
	offset: Option<usize>,
	since: Cursor,
	before: Cursor,
	limit: Option<usize>,
	itemcount: usize,
	buffer: VecDeque<Object>,
	cached: bool,
	cache_state: CacheState,
	url: Option<String>,
	// next cache position for sessions walking from the head
	appending: Option<usize>,
	exhausted: bool,
}

impl<'a> ItemList<'a> {
	/// query must be validated already
	pub(crate) fn new(feed: &'a mut Feed, pump: &'a Pump, query: Query) -> Self {
		let cached = query.cached || feed.is_fully_cached();
		let limit = match query.limit {
			Limit::PageSize => Some(pump.config().pagination.page_size),
			Limit::Count(n) => Some(n),
			Limit::Unbounded => None,
		};
		let offset = query.offset.filter(|x| *x > 0);
		let from_head = offset.is_none() && query.since.is_none() && query.before.is_none();

		ItemList {
			url: feed.url.clone(),
			feed,
			pump,
			offset,
			since: query.since.into(),
			before: query.before.into(),
			limit,
			itemcount: 0,
			buffer: VecDeque::new(),
			cached,
			cache_state: CacheState::NotStarted,
			appending: if from_head && !cached { Some(0) } else { None },
			exhausted: false,
		}
	}

	/// items handed out so far
	pub fn itemcount(&self) -> usize {
		self.itemcount
	}

	pub fn is_done(&self) -> bool {
		self.limit_reached() || (self.buffer.is_empty() && self.exhausted)
	}

	fn limit_reached(&self) -> bool {
		self.limit.is_some_and(|limit| self.itemcount >= limit)
	}

	/// load more items in the buffer, returning how many the source provided (before skipping bad ones)
	fn refill(&mut self) -> PumpResult<usize> {
		if self.cached {
			self.refill_from_cache()
		} else {
			self.fetch_page()
		}
	}

	fn refill_from_cache(&mut self) -> PumpResult<usize> {
		if self.cache_state != CacheState::NotStarted {
			self.cache_state = CacheState::Exhausted;
			return Ok(0);
		}

		let cache = self.feed.cached();
		let position = |id: &str| self.feed.position(id).ok_or_else(|| UsageError::NotCached(id.to_string()));

		let selection : Vec<Object> = if let Some(id) = self.before.pending() {
			cache[position(id)? + 1 ..].to_vec()
		} else if let Some(id) = self.since.pending() {
			cache[.. position(id)?].iter().rev().cloned().collect()
		} else if let Some(offset) = self.offset {
			cache.get(offset..).unwrap_or_default().to_vec()
		} else {
			cache.to_vec()
		};

		self.since.consume();
		self.before.consume();
		self.offset = None;
		self.cache_state = CacheState::ServedFullCache;

		let count = selection.len();
		self.buffer.extend(selection);
		Ok(count)
	}

	fn fetch_page(&mut self) -> PumpResult<usize> {
		let Some(url) = self.url.take() else { return Ok(0) };
		let pump = self.pump;
		let pagination = &pump.config().pagination;

		let mut params = Params::new();
		if let Some(limit) = self.limit {
			let count = limit.saturating_sub(self.itemcount).min(pagination.max_count);
			params.insert("count".to_string(), count.to_string());
		}
		if let Some(offset) = self.offset {
			params.insert("offset".to_string(), offset.to_string());
		}
		if let Some(since) = self.since.pending() {
			params.insert("since".to_string(), since.to_string());
		}
		if let Some(before) = self.before.pending() {
			params.insert("before".to_string(), before.to_string());
		}

		tracing::debug!("fetching page {url} {params:?}");
		let page = match pump.request(&url, Method::Get, &params, None) {
			Ok(page) => page,
			Err(e) => match pagination.transport_errors {
				TransportErrorPolicy::EndOfFeed => {
					tracing::warn!("failed fetching {url}, treating it as the end of the feed: {e}");
					return Ok(0);
				},
				TransportErrorPolicy::Propagate => return Err(e),
			},
		};

		// walking forward in time means following `prev` links, and reading each page backwards
		let since_mode = self.since.is_set();
		self.since.consume();
		self.before.consume();
		self.offset = None;

		let mapper = pump.mapper();
		let page_links = self.feed.absorb_page(&page, mapper);
		let direction = if since_mode { "prev" } else { "next" };
		self.url = page_links.get(direction).map(str::to_string);
		self.feed.links.remove(direction);

		let raw : Vec<serde_json::Value> = page.items().into_iter().cloned().collect();
		let count = raw.len();
		let mut objects = mapper.get_objects(raw, self.feed.implicit_type());
		if since_mode {
			objects.reverse();
		}

		if let Some(position) = self.appending.as_mut() {
			for obj in &objects {
				self.feed.cache_at(*position, obj.clone());
				*position += 1;
			}
		}

		self.buffer.extend(objects);
		Ok(count)
	}
}

impl Iterator for ItemList<'_> {
	type Item = PumpResult<Object>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.limit_reached() {
			return None;
		}

		while self.buffer.is_empty() && !self.exhausted {
			match self.refill() {
				Ok(0) => self.exhausted = true,
				Ok(_) => {},
				Err(e) => {
					self.exhausted = true;
					return Some(Err(e));
				},
			}
		}

		let item = self.buffer.pop_front()?;
		self.itemcount += 1;
		Some(Ok(item))
	}
}

impl std::fmt::Debug for ItemList<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ItemList")
			.field("url", &self.url)
			.field("offset", &self.offset)
			.field("since", &self.since)
			.field("before", &self.before)
			.field("limit", &self.limit)
			.field("itemcount", &self.itemcount)
			.field("buffered", &self.buffer.len())
			.field("cached", &self.cached)
			.field("cache_state", &self.cache_state)
			.finish()
	}
}
