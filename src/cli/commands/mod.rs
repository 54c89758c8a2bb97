//! CLI command implementations.

pub mod files;
pub mod run;
pub mod session;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::HttpGenerationService;
use crate::domain::models::Config;
use crate::services::WorkflowEngine;

/// Engine bound to the HTTP Generation Service.
pub type HttpWorkflowEngine = WorkflowEngine<HttpGenerationService>;

/// Build an engine talking to the configured Generation Service.
pub fn build_engine(config: &Config) -> Result<Arc<HttpWorkflowEngine>> {
    let service = HttpGenerationService::new(&config.service)
        .context("Failed to set up the Generation Service client")?;
    tracing::debug!(base_url = %service.base_url(), "generation service client ready");
    Ok(Arc::new(WorkflowEngine::new(
        Arc::new(service),
        config.workflow.clone(),
    )))
}
