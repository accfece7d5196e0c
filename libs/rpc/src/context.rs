use std::time::Duration;

use uuid::Uuid;

/// Context-like first argument of every client call.
///
/// Carries the request id propagated in the `x-request-id` header and an
/// optional deadline expressed as a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    request_id: Uuid,
    timeout: Option<Duration>,
}

impl CallContext {
    /// Fresh context with a new request id and no deadline
    pub fn background() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timeout: None,
        }
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Attach the context to an outgoing request
    pub fn apply<T>(&self, request: &mut tonic::Request<T>) {
        if let Some(timeout) = self.timeout {
            request.set_timeout(timeout);
        }
        if let Ok(value) = self.request_id.to_string().parse() {
            request.metadata_mut().insert("x-request-id", value);
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}
