pub mod client;
pub mod config;
pub mod errors;
pub mod feed;
pub mod links;
pub mod mapper;
pub mod model;
pub mod transport;

pub use client::Pump;
pub use config::Config;
pub use errors::{PumpError, PumpResult, UsageError, LoggableError};
pub use errors::PumpResult as Result;
pub use errors::PumpError as Error;
pub use feed::{Anchor, Feed, ItemList, Limit, Query};
pub use links::LinkTable;
pub use mapper::Mapper;
pub use model::Object;
pub use transport::{Method, Params, Transport, TransportError};

#[cfg(feature = "fetch")]
pub use transport::HttpTransport;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
