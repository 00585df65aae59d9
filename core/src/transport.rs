use std::collections::BTreeMap;

/// query string parameters of a request
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

impl AsRef<str> for Method {
	fn as_ref(&self) -> &str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}

impl std::fmt::Display for Method {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_ref())
	}
}

#[cfg(feature = "fetch")]
impl From<Method> for reqwest::Method {
	fn from(value: Method) -> Self {
		match value {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("request failed with status {0}: {1}")]
	Status(u16, String),

	#[error("server unreachable: {0}")]
	Unreachable(String),

	#[error("response is not valid json: {0:?}")]
	Json(#[from] serde_json::Error),

	#[cfg(feature = "fetch")]
	#[error("error performing request: {0:?}")]
	Reqwest(#[from] reqwest::Error),
}

/// Authenticated access to the remote api. Signing requests is up to implementors.
///
/// Calls are blocking and happen one at a time: nothing in this crate issues concurrent requests,
/// and nothing requires implementors to be `Send` or `Sync`.
pub trait Transport {
	/// Perform one request and decode its json body. With `raw` set, `url` is used as-is,
	/// otherwise it's an endpoint path relative to the server root. Non-2xx answers must be errors.
	fn request(
		&self,
		url: &str,
		method: Method,
		params: &Params,
		data: Option<&serde_json::Value>,
		raw: bool,
	) -> Result<serde_json::Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
	fn request(&self, url: &str, method: Method, params: &Params, data: Option<&serde_json::Value>, raw: bool) -> Result<serde_json::Value, TransportError> {
		(**self).request(url, method, params, data, raw)
	}
}

pub fn is_absolute(url: &str) -> bool {
	url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(feature = "fetch")]
pub struct HttpTransport {
	client: reqwest::blocking::Client,
	base: String,
	authorization: Option<String>,
}

#[cfg(feature = "fetch")]
impl HttpTransport {
	pub fn new(cfg: &crate::Config) -> Result<Self, TransportError> {
		let client = reqwest::blocking::Client::builder()
			.user_agent(format!("pump+{} ({})", crate::VERSION, cfg.server.host))
			.build()?;
		Ok(HttpTransport {
			client,
			base: cfg.base_url(),
			authorization: cfg.server.authorization.clone(),
		})
	}
}

#[cfg(feature = "fetch")]
impl Transport for HttpTransport {
	fn request(
		&self,
		url: &str,
		method: Method,
		params: &Params,
		data: Option<&serde_json::Value>,
		raw: bool,
	) -> Result<serde_json::Value, TransportError> {
		use reqwest::header::{ACCEPT, AUTHORIZATION};

		let url = if raw { url.to_string() } else { format!("{}/{}", self.base, url.trim_start_matches('/')) };
		tracing::debug!("{method} {url} {params:?}");

		let mut request = self.client
			.request(method.into(), &url)
			.query(params)
			.header(ACCEPT, "application/json");

		if let Some(ref auth) = self.authorization {
			request = request.header(AUTHORIZATION, auth);
		}

		if let Some(data) = data {
			request = request.json(data);
		}

		let response = request.send()?;

		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status(status.as_u16(), response.text().unwrap_or_default()));
		}

		Ok(response.json::<serde_json::Value>()?)
	}
}

#[cfg(test)]
pub(crate) mod mock {
	use std::{cell::RefCell, collections::VecDeque, rc::Rc};

	use super::{Method, Params, Transport, TransportError};

	#[derive(Debug, Clone)]
	pub struct Recorded {
		pub url: String,
		pub method: Method,
		pub params: Params,
		pub data: Option<serde_json::Value>,
		pub raw: bool,
	}

	#[derive(Default)]
	struct State {
		responses: VecDeque<Result<serde_json::Value, TransportError>>,
		requests: Vec<Recorded>,
	}

	/// Answers with scripted responses in order, remembering every request.
	/// Clones share state, so tests keep one clone around to inspect traffic.
	#[derive(Clone, Default)]
	pub struct MockTransport {
		state: Rc<RefCell<State>>,
	}

	impl MockTransport {
		pub fn respond(&self, value: serde_json::Value) -> &Self {
			self.state.borrow_mut().responses.push_back(Ok(value));
			self
		}

		pub fn fail(&self, status: u16) -> &Self {
			self.state.borrow_mut().responses.push_back(Err(TransportError::Status(status, "scripted failure".into())));
			self
		}

		pub fn requests(&self) -> Vec<Recorded> {
			self.state.borrow().requests.clone()
		}

		pub fn count(&self) -> usize {
			self.state.borrow().requests.len()
		}
	}

	impl Transport for MockTransport {
		fn request(&self, url: &str, method: Method, params: &Params, data: Option<&serde_json::Value>, raw: bool) -> Result<serde_json::Value, TransportError> {
			let mut state = self.state.borrow_mut();
			state.requests.push(Recorded {
				url: url.to_string(),
				method,
				params: params.clone(),
				data: data.cloned(),
				raw,
			});
			state.responses
				.pop_front()
				.unwrap_or_else(|| Err(TransportError::Unreachable(format!("nothing scripted for {url}"))))
		}
	}
}
