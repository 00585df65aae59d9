use crate::{Field, Object};

/// resolve a `{ url, pump_io: { proxyURL } }` media link, the proxy wins if present
pub fn link_url(link: &serde_json::Value) -> Field<String> {
	if let Ok(proxy) = link.proxy_url() {
		return Ok(proxy.to_string());
	}
	link.url().map(|x| x.to_string())
}

#[cfg(test)]
mod test {
	use super::link_url;

	#[test]
	fn proxied_links_win() {
		let image = serde_json::json!({
			"url": "https://remote.example/a.png",
			"pump_io": { "proxyURL": "https://pump.example/api/proxy/a" },
		});
		assert_eq!(link_url(&image).ok().as_deref(), Some("https://pump.example/api/proxy/a"));
		assert_eq!(link_url(&serde_json::json!({ "url": "https://remote.example/b.png" })).ok().as_deref(), Some("https://remote.example/b.png"));
		assert_eq!(link_url(&serde_json::json!({ "width": 32 })).err(), Some(crate::FieldErr("url")));
	}
}
