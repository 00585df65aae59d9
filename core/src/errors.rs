use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum PumpError {
	#[error("invalid request: {0}")]
	Usage(#[from] UsageError),

	#[error("no item at index {0}")]
	Bounds(usize),

	#[error("transport error: {0}")]
	Transport(#[from] TransportError),

	#[error("malformed object: {0}")]
	Deserialization(#[from] actstream::FieldErr),

	// server answered with valid json of the wrong shape, e.g. a string where an object belongs
	#[error("unexpected response shape: {0}")]
	Malformed(&'static str),
}

/// Caller mistakes, always detected before touching the network
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
	#[error("can not paginate with both offset and since/before")]
	OffsetWithCursor,

	#[error("can not paginate with both since and before")]
	SinceWithBefore,

	#[error("item '{0}' is not in the cached feed")]
	NotCached(String),

	#[error("slice step must be greater than zero")]
	ZeroStep,
}

impl PumpError {
	pub fn is_usage(&self) -> bool {
		matches!(self, PumpError::Usage(_))
	}

	pub fn is_bounds(&self) -> bool {
		matches!(self, PumpError::Bounds(_))
	}

	pub fn is_transport(&self) -> bool {
		matches!(self, PumpError::Transport(_))
	}
}

pub type PumpResult<T> = Result<T, PumpError>;

pub trait LoggableError {
	fn info_failed(self, msg: &str);
	fn warn_failed(self, msg: &str);
	fn err_failed(self, msg: &str);
}

impl<T, E: std::error::Error> LoggableError for Result<T, E> {
	fn info_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::info!("{} : {}", msg, e);
		}
	}

	fn warn_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::warn!("{} : {}", msg, e);
		}
	}

	fn err_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::error!("{} : {}", msg, e);
		}
	}
}
