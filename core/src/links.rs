use std::collections::BTreeMap;

use actstream::Object;

use crate::model::Merge;

/// endpoint names that servers may put at top level instead of inside `links`
pub const ENDPOINTS : &[&str] = &[
	"self", "likes", "replies", "shares",
	"followers", "following", "lists", "favorites", "members",
];

/// Flat name -> url view of all the ways a payload can point to related resources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable(BTreeMap<String, String>);

impl LinkTable {
	pub fn new() -> Self {
		LinkTable::default()
	}

	/// Collect links from `data`, looking at known endpoints plus `extra` ones.
	/// Endpoint objects without a proxy or a `url` are resolved with their `fallback` key.
	pub fn extract(data: &serde_json::Value, extra: &[impl AsRef<str>], fallback: &str) -> Self {
		let mut table = LinkTable::new();
		table.extract_into(data, extra, fallback);
		table
	}

	/// Same as [LinkTable::extract], but overwriting entries of this table
	pub fn extract_into(&mut self, data: &serde_json::Value, extra: &[impl AsRef<str>], fallback: &str) {
		if let Ok(serde_json::Value::Object(links)) = data.links() {
			for (name, entry) in links {
				match entry {
					serde_json::Value::String(href) => self.insert(name, href),
					x => match x.get("href").and_then(|h| h.as_str()) {
						Some(href) => self.insert(name, href),
						None => tracing::debug!("ignoring link '{name}' without href"),
					},
				}
			}
		}

		let names = ENDPOINTS
			.iter()
			.copied()
			.chain(extra.iter().map(|x| x.as_ref()));

		for name in names {
			let Some(endpoint) = data.get(name) else { continue };
			if let Some(url) = endpoint_url(endpoint, fallback) {
				self.insert(name, &url);
			}
		}
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(|x| x.as_str())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn insert(&mut self, name: &str, url: &str) {
		self.0.insert(name.to_string(), url.to_string());
	}

	pub fn remove(&mut self, name: &str) -> Option<String> {
		self.0.remove(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Merge for LinkTable {
	fn merge(mut self, newer: Self) -> Self {
		self.0.extend(newer.0);
		self
	}
}

fn endpoint_url(endpoint: &serde_json::Value, fallback: &str) -> Option<String> {
	if let Some(url) = endpoint.as_str() {
		return Some(url.to_string());
	}
	if let Ok(proxy) = endpoint.proxy_url() {
		return Some(proxy.to_string());
	}
	if let Ok(url) = endpoint.url() {
		return Some(url.to_string());
	}
	endpoint.get(fallback)
		.and_then(|x| x.as_str())
		.map(|x| x.to_string())
}

#[cfg(test)]
mod test {
	use super::LinkTable;
	use crate::model::Merge;

	const NONE : &[&str] = &[];

	#[test]
	fn proxy_wins_over_url_and_url_over_fallback() {
		let data = serde_json::json!({
			"likes": { "pump_io": { "proxyURL": "P" }, "url": "not me" },
			"replies": { "url": "R" },
			"shares": { "href": "S" },
		});

		let table = LinkTable::extract(&data, NONE, "href");
		assert_eq!(table.get("likes"), Some("P"));
		assert_eq!(table.get("replies"), Some("R"));
		assert_eq!(table.get("shares"), Some("S"));
		assert_eq!(table.len(), 3);
	}

	#[test]
	fn links_map_and_named_keys_are_both_collected() {
		let data = serde_json::json!({
			"links": {
				"self": { "href": "https://pump.example/api/user/alice" },
				"activity-inbox": { "href": "https://pump.example/api/user/alice/inbox" },
			},
			"followers": { "url": "https://pump.example/api/user/alice/followers" },
			"lists": "https://pump.example/api/user/alice/lists/person",
			"unrelated": { "url": "https://pump.example/nope" },
		});

		let table = LinkTable::extract(&data, NONE, "href");
		assert_eq!(table.get("self"), Some("https://pump.example/api/user/alice"));
		assert_eq!(table.get("activity-inbox"), Some("https://pump.example/api/user/alice/inbox"));
		assert_eq!(table.get("followers"), Some("https://pump.example/api/user/alice/followers"));
		assert_eq!(table.get("lists"), Some("https://pump.example/api/user/alice/lists/person"));
		assert!(!table.contains("unrelated"));
	}

	#[test]
	fn extra_keys_and_custom_fallback() {
		let data = serde_json::json!({ "inbox": { "endpoint": "api/user/alice/inbox" } });
		assert!(LinkTable::extract(&data, NONE, "href").is_empty());
		let table = LinkTable::extract(&data, &["inbox"], "endpoint");
		assert_eq!(table.get("inbox"), Some("api/user/alice/inbox"));
	}

	#[test]
	fn reextraction_overwrites_same_names_and_keeps_others() {
		let mut table = LinkTable::extract(&serde_json::json!({
			"likes": { "url": "old likes" },
			"replies": { "url": "replies" },
		}), NONE, "href");

		table.extract_into(&serde_json::json!({ "likes": { "url": "new likes" } }), NONE, "href");
		assert_eq!(table.get("likes"), Some("new likes"));
		assert_eq!(table.get("replies"), Some("replies"));

		let merged = table.merge(LinkTable::extract(&serde_json::json!({ "shares": "shares" }), NONE, "href"));
		assert_eq!(merged.len(), 3);
	}
}
