//! Catalog search proxy library.
//!
//! Forwards `/api/{resource}` searches to a public catalog API, checks the
//! response shape and optionally re-sorts the returned page.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use catalog::{Envelope, SortDirection, SortSpec, UpstreamClient};
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
