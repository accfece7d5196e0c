//! # Mock Recorder
//!
//! Expectation-driven test doubles for gRPC client interfaces.
//!
//! A [`Controller`] stands in for a real interface implementation: tests
//! declare expected calls up front, the mock routes every actual call through
//! [`Controller::invoke`], and [`Controller::verify`] (or dropping the
//! controller) fails the test if an expected call never happened.
//!
//! ## Features
//!
//! - **Typed dispatch**: [`mock_interface!`] generates tagged `Call`/`Reply`
//!   variants and one [`Method`] marker per operation, so no reflection is needed
//! - **Matchers**: [`any`], [`eq`], [`function`], [`not`] on the request, plus
//!   optional matchers for the call context and trailing options
//! - **Call counts**: [`Times`], defaulting to exactly one call
//! - **Ordering**: [`Sequence`] and the `MOCK_STRICT_ORDER` setting
//! - **Failure reporting**: [`PanicReporter`] aborts the test,
//!   [`CollectingReporter`] records failures for inspection
//!
//! ## Quick Start
//!
//! ```ignore
//! use mock_recorder::{any, Times};
//!
//! let mock = MockMetadataServiceClient::new();
//! mock.expect()
//!     .get_schemas(any())
//!     .times(Times::at_least(1))
//!     .return_const(SchemaResponse::default());
//!
//! let response = mock.get_schemas(CallContext::background(), SchemaRequest {}, vec![]).await?;
//! // Expectations are verified when `mock` is dropped
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod expectation;
pub mod interface;
pub mod matcher;
pub mod record;
pub mod reporter;
pub mod sequence;
pub mod telemetry;
pub mod times;

// Re-export main types and functions for convenience
pub use config::{ConfigError, FromEnv, RecorderConfig};
pub use controller::Controller;
pub use error::MockFailure;
pub use expectation::ExpectationHandle;
pub use interface::{Interface, Method};
pub use matcher::{Matcher, any, eq, function, not};
pub use record::CallRecord;
pub use reporter::{CollectingReporter, FailureReporter, PanicReporter};
pub use sequence::Sequence;
pub use telemetry::init_test_tracing;
pub use times::Times;
