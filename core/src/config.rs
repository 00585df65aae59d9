
#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub server: ServerConfig,

	#[serde(default)]
	pub pagination: PaginationConfig,

	#[serde(default)]
	pub mapper: MapperConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct ServerConfig {
	#[serde_inline_default("pump.example".into())]
	/// server hostname, endpoints are resolved against it
	pub host: String,

	#[serde_inline_default(true)]
	/// use https when building endpoint urls
	pub secure: bool,

	#[serde(default)]
	/// local user acting through this client, activities go into their outbox
	pub nickname: String,

	#[serde(default)]
	/// pre-computed Authorization header value, passed through as-is
	pub authorization: Option<String>,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct PaginationConfig {
	#[serde_inline_default(20)]
	/// default limit for feed item sessions
	pub page_size: usize,

	#[serde_inline_default(200)]
	/// servers refuse larger `count` parameters
	pub max_count: usize,

	#[serde(default)]
	/// what a failed page fetch means for the feed being walked
	pub transport_errors: TransportErrorPolicy,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct MapperConfig {
	#[serde(default)]
	/// endpoint names to extract into link tables, on top of the builtin ones
	pub extra_link_keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportErrorPolicy {
	/// log and stop iterating, as if the feed ended there
	#[default]
	EndOfFeed,
	/// hand the error to whoever is iterating
	Propagate,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}

	pub fn base_url(&self) -> String {
		let scheme = if self.server.secure { "https" } else { "http" };
		format!("{scheme}://{}", self.server.host)
	}
}

#[cfg(test)]
mod test {
	use super::{Config, TransportErrorPolicy};

	#[test]
	fn partial_config_fills_defaults() {
		let cfg : Config = toml::from_str(r#"
			[server]
			host = "social.example"
			nickname = "alice"

			[pagination]
			transport_errors = "propagate"
		"#).unwrap();

		assert_eq!(cfg.server.host, "social.example");
		assert!(cfg.server.secure);
		assert_eq!(cfg.pagination.page_size, 20);
		assert_eq!(cfg.pagination.max_count, 200);
		assert_eq!(cfg.pagination.transport_errors, TransportErrorPolicy::Propagate);
		assert!(cfg.mapper.extra_link_keys.is_empty());
		assert_eq!(cfg.base_url(), "https://social.example");
	}

	#[test]
	fn default_policy_ends_feed() {
		assert_eq!(Config::default().pagination.transport_errors, TransportErrorPolicy::EndOfFeed);
	}
}
