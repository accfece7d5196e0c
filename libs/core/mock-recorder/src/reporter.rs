use std::sync::{Arc, Mutex, PoisonError};

use crate::error::MockFailure;

/// Receives test-framework failures from a controller.
///
/// Controllers never call the reporter while holding their ledger lock, so a
/// reporter is free to panic.
#[cfg_attr(test, mockall::automock)]
pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: &MockFailure);

    /// Report every failure found by a single verification pass
    fn report_all(&self, failures: &[MockFailure]) {
        for failure in failures {
            self.report(failure);
        }
    }
}

/// Fails the running test by panicking (the default reporter)
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    fn report(&self, failure: &MockFailure) {
        panic!("{failure}");
    }

    fn report_all(&self, failures: &[MockFailure]) {
        match failures {
            [] => {}
            [failure] => self.report(failure),
            failures => {
                let messages = failures
                    .iter()
                    .map(|failure| format!("  - {failure}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                panic!("{} mock expectations failed:\n{messages}", failures.len());
            }
        }
    }
}

/// Keeps failures for later inspection instead of aborting.
///
/// Clones share the same failure list, so a test can hand one clone to a
/// controller and assert on the other.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    failures: Arc<Mutex<Vec<MockFailure>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<MockFailure> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Drain the collected failures
    pub fn take(&self) -> Vec<MockFailure> {
        std::mem::take(&mut *self.failures.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl FailureReporter for CollectingReporter {
    fn report(&self, failure: &MockFailure) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure.clone());
    }
}
