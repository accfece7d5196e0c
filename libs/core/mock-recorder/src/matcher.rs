//! Argument matchers
//!
//! A matcher decides whether an actual argument satisfies an expectation and
//! describes itself for failure messages.
//!
//! ```ignore
//! use mock_recorder::matcher::{any, eq, function, not};
//!
//! recorder.get_schemas(any());
//! recorder.get_schema_by_agent(eq(SchemaByAgentRequest { agent_id: id.clone() }));
//! recorder.get_agent_info(function("healthy only", |r: &AgentInfoRequest| r.healthy_only));
//! recorder.get_schema_by_agent(not(eq(SchemaByAgentRequest::default())));
//! ```

use std::fmt;

pub trait Matcher<T: ?Sized>: Send + Sync {
    fn matches(&self, actual: &T) -> bool;

    fn describe(&self) -> String;
}

impl<T: ?Sized> Matcher<T> for Box<dyn Matcher<T>> {
    fn matches(&self, actual: &T) -> bool {
        self.as_ref().matches(actual)
    }

    fn describe(&self) -> String {
        self.as_ref().describe()
    }
}

/// Matches every value
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl<T: ?Sized> Matcher<T> for Any {
    fn matches(&self, _actual: &T) -> bool {
        true
    }

    fn describe(&self) -> String {
        "any".to_string()
    }
}

/// Matches values equal to the expected one
#[derive(Debug, Clone)]
pub struct Eq<T>(T);

impl<T> Matcher<T> for Eq<T>
where
    T: PartialEq + fmt::Debug + Send + Sync,
{
    fn matches(&self, actual: &T) -> bool {
        self.0 == *actual
    }

    fn describe(&self) -> String {
        format!("eq({:?})", self.0)
    }
}

/// Matches values accepted by a closure
pub struct Function<F> {
    description: String,
    predicate: F,
}

impl<T, F> Matcher<T> for Function<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, actual: &T) -> bool {
        (self.predicate)(actual)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Inverts another matcher
pub struct Not<M>(M);

impl<T, M> Matcher<T> for Not<M>
where
    T: ?Sized,
    M: Matcher<T>,
{
    fn matches(&self, actual: &T) -> bool {
        !self.0.matches(actual)
    }

    fn describe(&self) -> String {
        format!("not({})", self.0.describe())
    }
}

pub fn any() -> Any {
    Any
}

pub fn eq<T>(expected: T) -> Eq<T> {
    Eq(expected)
}

pub fn function<T, F>(description: impl Into<String>, predicate: F) -> Function<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    Function {
        description: description.into(),
        predicate,
    }
}

pub fn not<M>(inner: M) -> Not<M> {
    Not(inner)
}
