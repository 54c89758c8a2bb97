//! Domain layer for the casegen workflow
//!
//! This module contains the workflow models, the error taxonomy and the
//! Generation Service port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{
    ErrorKind, Operation, ServiceError, ServiceResult, Stage, WorkflowError, WorkflowResult,
};
