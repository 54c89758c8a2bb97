//! Adapters implementing the domain ports.
//!
//! - `http`: the Generation Service over HTTP+JSON
//! - `mock`: a scriptable in-memory Generation Service for tests and demos

pub mod http;
pub mod mock;

pub use http::HttpGenerationService;
pub use mock::MockGenerationService;
