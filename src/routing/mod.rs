//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/{resource}
//!     → resources.rs (resource lookup)
//!     → Return: known resource or NoMatch (404, no upstream call)
//!
//! Table Compilation (at startup):
//!     upstream.resources from config
//!     → Freeze as immutable ResourceTable
//! ```

pub mod resources;

pub use resources::ResourceTable;
