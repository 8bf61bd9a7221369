//! Catalog search subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/{resource}
//!     → client.rs (fetch upstream page → Envelope)
//!     → normalize.rs (take "results" out as ResultSet)
//!     → sort.rs (optional, stable type-aware reorder)
//!     → assemble.rs (put ResultSet back into Envelope)
//!     → serialized to the client
//! ```
//!
//! # Design Decisions
//! - Envelope and ResultSet are request-scoped; nothing is shared across requests
//! - Metadata fields next to `results` pass through untouched and in order
//! - Fetch and shape failures are terminal for the request, never retried
//! - Sorting never fails

pub mod assemble;
pub mod client;
pub mod normalize;
pub mod sort;
pub mod types;

pub use assemble::assemble;
pub use client::UpstreamClient;
pub use normalize::normalize;
pub use sort::sort;
pub use types::{Envelope, FetchError, Record, ResultSet, ShapeError, SortDirection, SortSpec};
