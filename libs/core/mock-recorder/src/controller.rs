use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::config::RecorderConfig;
use crate::error::MockFailure;
use crate::expectation::{Expectation, ExpectationHandle};
use crate::interface::{Interface, Method};
use crate::matcher::Matcher;
use crate::record::CallRecord;
use crate::reporter::FailureReporter;
use crate::sequence::Sequence;

static NEXT_CONTROLLER_ID: AtomicUsize = AtomicUsize::new(0);

struct Ledger<I: Interface> {
    expectations: Vec<Expectation<I>>,
    calls: Vec<CallRecord<I>>,
}

/// Outcome of looking up an expectation for an actual call
enum Resolution {
    Matched(usize),
    Unmatched,
    Saturated(usize),
    Blocked { index: usize, prerequisite: usize },
    Retired(usize),
}

/// Owns the expectations and call records of one mocked interface.
///
/// Expectations are scanned in registration order and the first one that
/// accepts the call, still has calls left, and is not held back by its
/// sequence is consumed. Framework failures go to the [`FailureReporter`];
/// scripted application errors are returned to the caller untouched.
///
/// The ledger sits behind a single mutex, so a controller can be shared
/// across tasks. Scripted actions run while the lock is held and must not call
/// back into the same mock.
pub struct Controller<I: Interface> {
    id: usize,
    config: RecorderConfig,
    reporter: Box<dyn FailureReporter>,
    ledger: Mutex<Ledger<I>>,
    verified: AtomicBool,
}

impl<I: Interface> Controller<I> {
    /// Create a controller configured from the environment
    pub fn new(reporter: impl FailureReporter + 'static) -> Self {
        Self::with_config(reporter, RecorderConfig::from_env_or_default())
    }

    pub fn with_config(reporter: impl FailureReporter + 'static, config: RecorderConfig) -> Self {
        Self {
            id: NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            reporter: Box::new(reporter),
            ledger: Mutex::new(Ledger {
                expectations: Vec::new(),
                calls: Vec::new(),
            }),
            verified: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger<I>> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Declare an expected call of `M` whose request satisfies `request`.
    ///
    /// The expectation defaults to exactly one call returning
    /// `Ok(M::Response::default())`; use the returned handle to change that.
    pub fn register<M>(&self, request: impl Matcher<M::Request> + 'static) -> ExpectationHandle<'_, M>
    where
        M: Method<Interface = I>,
    {
        let mut ledger = self.ledger();
        let index = ledger.expectations.len();
        let mut expectation = Expectation::new::<M, _>(request);

        if self.config.strict_order && index > 0 {
            expectation.prerequisites.push(index - 1);
        }

        debug!(
            interface = I::NAME,
            method = M::NAME,
            index,
            expectation = %expectation.description(),
            "Expectation registered"
        );

        ledger.expectations.push(expectation);
        self.verified.store(false, Ordering::Relaxed);
        drop(ledger);

        ExpectationHandle::new(self, index)
    }

    pub(crate) fn update(&self, index: usize, f: impl FnOnce(&mut Expectation<I>)) {
        if let Some(expectation) = self.ledger().expectations.get_mut(index) {
            f(expectation);
        }
    }

    pub(crate) fn link<M>(&self, index: usize, sequence: &mut Sequence)
    where
        M: Method<Interface = I>,
    {
        match sequence.push(self.id, index) {
            Ok(Some(previous)) => self.update(index, |e| e.prerequisites.push(previous)),
            Ok(None) => {}
            Err(owner) => {
                debug!(controller = self.id, owner, "Sequence shared across controllers");
                self.report(&MockFailure::ForeignSequence {
                    interface: I::NAME,
                    method: M::NAME,
                });
            }
        }
    }

    /// Route an actual call through the registered expectations.
    ///
    /// Returns the scripted result of the consumed expectation. Unexpected,
    /// excess and out-of-order calls are reported as framework failures; if
    /// the reporter lets the test continue, the failure is returned as
    /// `I::Error`.
    pub fn invoke<M>(
        &self,
        context: I::Context,
        request: M::Request,
        options: Vec<I::CallOption>,
    ) -> Result<M::Response, I::Error>
    where
        M: Method<Interface = I>,
    {
        let call = M::into_call(request);

        let outcome = {
            let mut ledger = self.ledger();
            let resolution = resolve(&ledger.expectations, &call, &context, &options);

            let outcome = match resolution {
                Resolution::Matched(index) => {
                    retire_prerequisites(&mut ledger.expectations, index);
                    let expectation = &mut ledger.expectations[index];
                    let reply = expectation.respond(&call);
                    trace!(
                        interface = I::NAME,
                        method = M::NAME,
                        index,
                        calls = expectation.calls,
                        "Call matched expectation"
                    );
                    Ok((index, reply))
                }
                resolution => Err(self.describe_failure::<M>(&ledger.expectations, resolution, &call)),
            };

            let expectation = outcome.as_ref().ok().map(|(index, _)| *index);
            ledger
                .calls
                .push(CallRecord::new(call, context, options, expectation));
            outcome
        };

        match outcome {
            Ok((_, reply)) => M::from_reply(reply).unwrap_or_else(|| {
                Err(self.fail(MockFailure::ReplyMismatch {
                    interface: I::NAME,
                    method: M::NAME,
                }))
            }),
            Err(failure) => Err(self.fail(failure)),
        }
    }

    fn describe_failure<M>(
        &self,
        expectations: &[Expectation<I>],
        resolution: Resolution,
        call: &I::Call,
    ) -> MockFailure
    where
        M: Method<Interface = I>,
    {
        let arguments = M::request(call)
            .map(|request| format!("{request:?}"))
            .unwrap_or_default();

        match resolution {
            Resolution::Matched(_) | Resolution::Unmatched => MockFailure::UnexpectedCall {
                interface: I::NAME,
                method: M::NAME,
                arguments,
            },
            Resolution::Saturated(index) => MockFailure::CallCountExceeded {
                interface: I::NAME,
                method: M::NAME,
                arguments,
                expected: expectations[index].times,
                actual: expectations[index].calls,
            },
            Resolution::Blocked {
                index,
                prerequisite,
            } => {
                let waiting_on = &expectations[prerequisite];
                MockFailure::OutOfOrder {
                    interface: I::NAME,
                    method: M::NAME,
                    arguments,
                    reason: format!(
                        "{} must wait for {} ({} of {} call(s) made)",
                        expectations[index].description(),
                        waiting_on.description(),
                        waiting_on.calls,
                        waiting_on.times
                    ),
                }
            }
            Resolution::Retired(index) => MockFailure::OutOfOrder {
                interface: I::NAME,
                method: M::NAME,
                arguments,
                reason: format!(
                    "{} was retired by a later call in its sequence",
                    expectations[index].description()
                ),
            },
        }
    }

    fn report(&self, failure: &MockFailure) {
        warn!(
            interface = failure.interface(),
            method = failure.method(),
            failure = %failure,
            "Mock expectation failed"
        );
        self.reporter.report(failure);
    }

    /// Hand a failure to the reporter and convert it for the caller
    fn fail(&self, failure: MockFailure) -> I::Error {
        self.report(&failure);
        failure.into()
    }

    /// Expectations that have not reached their minimum call count
    pub fn unsatisfied(&self) -> Vec<MockFailure> {
        self.ledger()
            .expectations
            .iter()
            .filter(|e| !e.is_satisfied())
            .map(|e| MockFailure::Unsatisfied {
                interface: I::NAME,
                method: e.method(),
                matcher: e.matcher_description().to_string(),
                expected: e.times,
                actual: e.calls,
            })
            .collect()
    }

    /// Report every expectation below its minimum call count
    pub fn verify(&self) {
        self.verified.store(true, Ordering::Relaxed);

        let failures = self.unsatisfied();
        if failures.is_empty() {
            debug!(interface = I::NAME, "All expectations satisfied");
            return;
        }

        for failure in &failures {
            warn!(
                interface = I::NAME,
                method = failure.method(),
                failure = %failure,
                "Mock expectation unsatisfied"
            );
        }
        self.reporter.report_all(&failures);
    }

    /// Number of recorded calls, expected or not
    pub fn call_count(&self) -> usize {
        self.ledger().calls.len()
    }

    pub fn call_count_of(&self, method: &str) -> usize {
        self.ledger()
            .calls
            .iter()
            .filter(|record| record.method() == method)
            .count()
    }

    /// Clones of every recorded request of `M`, in call order
    pub fn requests<M>(&self) -> Vec<M::Request>
    where
        M: Method<Interface = I>,
        M::Request: Clone,
    {
        self.ledger()
            .calls
            .iter()
            .filter_map(|record| record.request::<M>().cloned())
            .collect()
    }

    /// Inspect the call log while holding the ledger lock
    pub fn with_calls<R>(&self, f: impl FnOnce(&[CallRecord<I>]) -> R) -> R {
        f(&self.ledger().calls)
    }
}

impl<I: Interface> Drop for Controller<I> {
    fn drop(&mut self) {
        if self.config.verify_on_drop
            && !self.verified.load(Ordering::Relaxed)
            && !std::thread::panicking()
        {
            self.verify();
        }
    }
}

fn resolve<I: Interface>(
    expectations: &[Expectation<I>],
    call: &I::Call,
    context: &I::Context,
    options: &[I::CallOption],
) -> Resolution {
    let mut fallback = Resolution::Unmatched;

    for (index, expectation) in expectations.iter().enumerate() {
        if !expectation.matches(call, context, options) {
            continue;
        }

        if expectation.retired {
            if matches!(fallback, Resolution::Unmatched) {
                fallback = Resolution::Retired(index);
            }
            continue;
        }

        if expectation.is_saturated() {
            if matches!(fallback, Resolution::Unmatched | Resolution::Retired(_)) {
                fallback = Resolution::Saturated(index);
            }
            continue;
        }

        let blocked_on = expectation
            .prerequisites
            .iter()
            .copied()
            .find(|&p| !expectations[p].is_satisfied());

        match blocked_on {
            Some(prerequisite) => {
                if !matches!(fallback, Resolution::Blocked { .. }) {
                    fallback = Resolution::Blocked {
                        index,
                        prerequisite,
                    };
                }
            }
            None => return Resolution::Matched(index),
        }
    }

    fallback
}

/// Retire every expectation the sequence has moved past
fn retire_prerequisites<I: Interface>(expectations: &mut [Expectation<I>], index: usize) {
    let mut pending = expectations[index].prerequisites.clone();

    while let Some(prerequisite) = pending.pop() {
        let expectation = &mut expectations[prerequisite];
        if !expectation.retired {
            expectation.retired = true;
            pending.extend(expectation.prerequisites.iter().copied());
        }
    }
}
