//! Port trait definitions (Hexagonal Architecture)
//!
//! - GenerationService: the remote backend that lists files, returns content,
//!   and produces summaries, code and pull requests
//!
//! The workflow engine depends on this trait, never on a concrete HTTP client.

pub mod generation_service;

pub use generation_service::GenerationService;
