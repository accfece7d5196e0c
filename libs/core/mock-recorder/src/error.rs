use thiserror::Error;

use crate::times::Times;

/// Test-framework assertion failures
///
/// These are never part of the mocked interface's own error channel: they are
/// handed to a [`FailureReporter`](crate::FailureReporter), which normally
/// aborts the test.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// No registered expectation accepts the call
    #[error("Unexpected call to {interface}.{method}({arguments}): no matching expectation registered")]
    UnexpectedCall {
        interface: &'static str,
        method: &'static str,
        arguments: String,
    },

    /// The only matching expectations have already been called their maximum number of times
    #[error(
        "Unexpected call to {interface}.{method}({arguments}): expected {expected} call(s), \
         already called {actual} time(s)"
    )]
    CallCountExceeded {
        interface: &'static str,
        method: &'static str,
        arguments: String,
        expected: Times,
        actual: usize,
    },

    /// A matching expectation exists but its sequence forbids the call right now
    #[error("Out-of-order call to {interface}.{method}({arguments}): {reason}")]
    OutOfOrder {
        interface: &'static str,
        method: &'static str,
        arguments: String,
        reason: String,
    },

    /// Verification found an expectation below its minimum call count
    #[error(
        "Missing call(s) to {interface}.{method}({matcher}): expected {expected} call(s), \
         got {actual}"
    )]
    Unsatisfied {
        interface: &'static str,
        method: &'static str,
        matcher: String,
        expected: Times,
        actual: usize,
    },

    /// A sequence was shared between two controllers
    #[error("Sequence used with {interface}.{method} belongs to another controller")]
    ForeignSequence {
        interface: &'static str,
        method: &'static str,
    },

    /// A scripted action produced a reply for a different method
    #[error("Scripted reply for {interface}.{method} has the wrong variant")]
    ReplyMismatch {
        interface: &'static str,
        method: &'static str,
    },
}

impl MockFailure {
    /// Name of the method the failure is about
    pub fn method(&self) -> &'static str {
        match self {
            MockFailure::UnexpectedCall { method, .. }
            | MockFailure::CallCountExceeded { method, .. }
            | MockFailure::OutOfOrder { method, .. }
            | MockFailure::Unsatisfied { method, .. }
            | MockFailure::ForeignSequence { method, .. }
            | MockFailure::ReplyMismatch { method, .. } => *method,
        }
    }

    pub fn interface(&self) -> &'static str {
        match self {
            MockFailure::UnexpectedCall { interface, .. }
            | MockFailure::CallCountExceeded { interface, .. }
            | MockFailure::OutOfOrder { interface, .. }
            | MockFailure::Unsatisfied { interface, .. }
            | MockFailure::ForeignSequence { interface, .. }
            | MockFailure::ReplyMismatch { interface, .. } => *interface,
        }
    }
}

// Returned to the caller when a non-panicking reporter lets the test continue
impl From<MockFailure> for tonic::Status {
    fn from(err: MockFailure) -> Self {
        match err {
            MockFailure::UnexpectedCall { .. } => tonic::Status::unimplemented(err.to_string()),
            MockFailure::CallCountExceeded { .. } | MockFailure::OutOfOrder { .. } => {
                tonic::Status::failed_precondition(err.to_string())
            }
            MockFailure::Unsatisfied { .. }
            | MockFailure::ForeignSequence { .. }
            | MockFailure::ReplyMismatch { .. } => tonic::Status::internal(err.to_string()),
        }
    }
}
