//! Request middleware applied in front of every route.

pub mod cors;
pub mod deadline;

pub use cors::{cors_middleware, CorsPolicy, OriginCheck};
pub use deadline::{deadline_middleware, Deadline};
