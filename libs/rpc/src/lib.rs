//! gRPC contracts shared between services and their tests.
//!
//! - [`metadata`]: checked-in prost messages for `metadata.v1`
//! - [`MetadataServiceClient`]: the client-side call surface of the metadata service
//! - [`CallContext`] / [`CallOption`]: per-call context and trailing options

pub mod client;
pub mod context;
pub mod options;

// @generated
pub mod metadata {
    include!("generated/metadata/v1/metadata.v1.rs");
}

pub use client::MetadataServiceClient;
pub use context::CallContext;
pub use options::{CallOption, apply_options};
