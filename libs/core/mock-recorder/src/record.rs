use std::fmt;

use chrono::{DateTime, Utc};

use crate::interface::{Interface, Method};

/// One observed invocation of a mocked interface
pub struct CallRecord<I: Interface> {
    method: &'static str,
    call: I::Call,
    context: I::Context,
    options: Vec<I::CallOption>,
    expectation: Option<usize>,
    recorded_at: DateTime<Utc>,
}

impl<I: Interface> CallRecord<I> {
    pub(crate) fn new(
        call: I::Call,
        context: I::Context,
        options: Vec<I::CallOption>,
        expectation: Option<usize>,
    ) -> Self {
        Self {
            method: I::method_name(&call),
            call,
            context,
            options,
            expectation,
            recorded_at: Utc::now(),
        }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn call(&self) -> &I::Call {
        &self.call
    }

    /// The request, if this record belongs to `M`
    pub fn request<M>(&self) -> Option<&M::Request>
    where
        M: Method<Interface = I>,
    {
        M::request(&self.call)
    }

    pub fn context(&self) -> &I::Context {
        &self.context
    }

    pub fn options(&self) -> &[I::CallOption] {
        &self.options
    }

    /// Registration index of the expectation this call consumed, `None` if it failed
    pub fn expectation(&self) -> Option<usize> {
        self.expectation
    }

    pub fn is_expected(&self) -> bool {
        self.expectation.is_some()
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl<I: Interface> fmt::Debug for CallRecord<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRecord")
            .field("method", &self.method)
            .field("call", &self.call)
            .field("context", &self.context)
            .field("options", &self.options)
            .field("expectation", &self.expectation)
            .field("recorded_at", &self.recorded_at)
            .finish()
    }
}
