use std::marker::PhantomData;

use crate::controller::Controller;
use crate::error::MockFailure;
use crate::interface::{Interface, Method};
use crate::matcher::Matcher;
use crate::sequence::Sequence;
use crate::times::Times;

type RequestMatcher<I> = Box<dyn Fn(&<I as Interface>::Call) -> bool + Send + Sync>;
type Action<I> = Box<dyn FnMut(&<I as Interface>::Call) -> <I as Interface>::Reply + Send>;

/// A registered expectation, erased over the interface's call variants
pub(crate) struct Expectation<I: Interface> {
    method: &'static str,
    request: RequestMatcher<I>,
    request_description: String,
    context: Option<Box<dyn Matcher<I::Context>>>,
    options: Option<Box<dyn Matcher<[I::CallOption]>>>,
    action: Action<I>,
    pub(crate) times: Times,
    pub(crate) calls: usize,
    pub(crate) prerequisites: Vec<usize>,
    pub(crate) retired: bool,
}

impl<I: Interface> Expectation<I> {
    pub(crate) fn new<M, R>(request: R) -> Self
    where
        M: Method<Interface = I>,
        R: Matcher<M::Request> + 'static,
    {
        let request_description = request.describe();

        Self {
            method: M::NAME,
            request: Box::new(move |call: &I::Call| {
                M::request(call).is_some_and(|r| request.matches(r))
            }),
            request_description,
            context: None,
            options: None,
            action: Box::new(|_: &I::Call| M::into_reply(Ok(M::Response::default()))),
            times: Times::default(),
            calls: 0,
            prerequisites: Vec::new(),
            retired: false,
        }
    }

    pub(crate) fn method(&self) -> &'static str {
        self.method
    }

    pub(crate) fn matches(
        &self,
        call: &I::Call,
        context: &I::Context,
        options: &[I::CallOption],
    ) -> bool {
        (self.request)(call)
            && self.context.as_ref().is_none_or(|m| m.matches(context))
            && self.options.as_ref().is_none_or(|m| m.matches(options))
    }

    pub(crate) fn is_satisfied(&self) -> bool {
        self.times.is_satisfied(self.calls)
    }

    pub(crate) fn is_saturated(&self) -> bool {
        self.times.is_saturated(self.calls)
    }

    pub(crate) fn respond(&mut self, call: &I::Call) -> I::Reply {
        self.calls += 1;
        (self.action)(call)
    }

    /// `Method(matcher)` plus any context/options constraints
    pub(crate) fn description(&self) -> String {
        let mut description = format!("{}({})", self.method, self.request_description);
        if let Some(context) = &self.context {
            description.push_str(&format!(" with context {}", context.describe()));
        }
        if let Some(options) = &self.options {
            description.push_str(&format!(" with options {}", options.describe()));
        }
        description
    }

    pub(crate) fn matcher_description(&self) -> &str {
        &self.request_description
    }

    pub(crate) fn set_context(&mut self, matcher: Box<dyn Matcher<I::Context>>) {
        self.context = Some(matcher);
    }

    pub(crate) fn set_options(&mut self, matcher: Box<dyn Matcher<[I::CallOption]>>) {
        self.options = Some(matcher);
    }

    pub(crate) fn set_action(&mut self, action: Action<I>) {
        self.action = action;
    }
}

/// Configures a freshly registered expectation.
///
/// Every builder call updates the controller's ledger in place, so the handle
/// can be dropped at any point.
pub struct ExpectationHandle<'a, M: Method> {
    controller: &'a Controller<M::Interface>,
    index: usize,
    _method: PhantomData<M>,
}

impl<'a, M: Method> ExpectationHandle<'a, M> {
    pub(crate) fn new(controller: &'a Controller<M::Interface>, index: usize) -> Self {
        Self {
            controller,
            index,
            _method: PhantomData,
        }
    }

    /// Registration index, as reported by [`CallRecord::expectation`](crate::CallRecord::expectation)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn times(self, times: Times) -> Self {
        self.controller.update(self.index, |e| e.times = times);
        self
    }

    pub fn once(self) -> Self {
        self.times(Times::once())
    }

    pub fn never(self) -> Self {
        self.times(Times::never())
    }

    /// Also require the call context to match
    pub fn with_context(
        self,
        matcher: impl Matcher<<M::Interface as Interface>::Context> + 'static,
    ) -> Self {
        self.controller
            .update(self.index, |e| e.set_context(Box::new(matcher)));
        self
    }

    /// Also require the trailing call options to match
    pub fn with_options(
        self,
        matcher: impl Matcher<[<M::Interface as Interface>::CallOption]> + 'static,
    ) -> Self {
        self.controller
            .update(self.index, |e| e.set_options(Box::new(matcher)));
        self
    }

    /// Compute the result from the actual request
    pub fn returning<F>(self, mut f: F) -> Self
    where
        F: FnMut(&M::Request) -> Result<M::Response, <M::Interface as Interface>::Error>
            + Send
            + 'static,
    {
        let action = Box::new(move |call: &<M::Interface as Interface>::Call| {
            match M::request(call) {
                Some(request) => M::into_reply(f(request)),
                None => M::into_reply(Err(MockFailure::ReplyMismatch {
                    interface: <M::Interface as Interface>::NAME,
                    method: M::NAME,
                }
                .into())),
            }
        });
        self.controller
            .update(self.index, move |e| e.set_action(action));
        self
    }

    pub fn return_const(self, response: M::Response) -> Self
    where
        M::Response: Clone,
    {
        self.returning(move |_| Ok(response.clone()))
    }

    /// Return a scripted application error
    pub fn return_err(self, error: <M::Interface as Interface>::Error) -> Self
    where
        <M::Interface as Interface>::Error: Clone,
    {
        self.returning(move |_| Err(error.clone()))
    }

    /// Return `result` exactly once; forces [`Times::once`]
    pub fn return_once(
        self,
        result: Result<M::Response, <M::Interface as Interface>::Error>,
    ) -> Self {
        let mut result = Some(result);
        self.once().returning(move |request| {
            result.take().unwrap_or_else(|| {
                Err(MockFailure::CallCountExceeded {
                    interface: <M::Interface as Interface>::NAME,
                    method: M::NAME,
                    arguments: format!("{request:?}"),
                    expected: Times::once(),
                    actual: 1,
                }
                .into())
            })
        })
    }

    pub fn in_sequence(self, sequence: &mut Sequence) -> Self {
        self.controller.link::<M>(self.index, sequence);
        self
    }
}
