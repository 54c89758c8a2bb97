//! Service layer: the workflow engine and the pieces it is built from.

pub mod content_barrier;
pub mod file_naming;
pub mod in_flight;
pub mod workflow_engine;

pub use workflow_engine::{WorkflowEngine, WorkflowSnapshot};
