//! Casegen - human-in-the-loop test case generation
//!
//! Casegen drives a Generation Service through a fixed workflow: list a
//! repository's files, select some, derive test case summaries from their
//! contents, generate test code for one summary, and open a pull request
//! with it.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Workflow models, errors and the `GenerationService` port
//! - **Service Layer** (`services`): The workflow engine and its fetch barrier
//! - **Adapters** (`adapters`): HTTP and in-memory `GenerationService` implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use casegen::{ConfigLoader, HttpGenerationService, WorkflowEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let service = Arc::new(HttpGenerationService::new(&config.service)?);
//!     let engine = WorkflowEngine::new(service, config.workflow);
//!
//!     engine.load_listing("https://github.com/octo/demo").await?;
//!     engine.toggle_selection("src/index.js").await;
//!     let summaries = engine.generate_summaries().await?;
//!     println!("{} summaries", summaries.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{HttpGenerationService, MockGenerationService};
pub use domain::errors::{ErrorKind, Operation, ServiceError, Stage, WorkflowError};
pub use domain::models::{
    ChangeRequestResult, Config, FileContent, FileEntry, GeneratedCode, LoggingConfig,
    RepositoryReference, ServiceConfig, SummaryId, TestSummary, WorkflowConfig,
};
pub use domain::ports::GenerationService;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::LoggerImpl;
pub use services::{WorkflowEngine, WorkflowSnapshot};
