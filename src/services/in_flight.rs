//! Per-operation in-flight flags.
//!
//! Each guarded operation owns one flag. Acquiring a flag that is already set
//! fails with [`WorkflowError::OperationInFlight`]; dropping the guard clears it,
//! including when the operation returns early with an error.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::errors::{Operation, WorkflowError, WorkflowResult};

#[derive(Debug, Default)]
pub struct InFlightFlags {
    load_listing: AtomicBool,
    generate_summaries: AtomicBool,
    generate_code: AtomicBool,
    submit_change: AtomicBool,
}

impl InFlightFlags {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, operation: Operation) -> &AtomicBool {
        match operation {
            Operation::LoadListing => &self.load_listing,
            Operation::GenerateSummaries => &self.generate_summaries,
            Operation::GenerateCode => &self.generate_code,
            Operation::SubmitChange => &self.submit_change,
        }
    }

    /// Mark `operation` as running, or fail if it already is.
    pub fn try_begin(&self, operation: Operation) -> WorkflowResult<InFlightGuard<'_>> {
        let flag = self.flag(operation);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| WorkflowError::OperationInFlight(operation))?;
        Ok(InFlightGuard { flag })
    }

    pub fn is_active(&self, operation: Operation) -> bool {
        self.flag(operation).load(Ordering::Acquire)
    }
}

/// Clears its flag on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
