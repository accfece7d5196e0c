//! Shared test utilities for metadata client tests
//!
//! This crate provides reusable test infrastructure:
//! - `TestDataBuilder`: Deterministic agent data generation
//! - `fixtures`: Schema and relation builders
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```
//! use rpc::metadata::{AgentState, DataType};
//! use test_utils::{TestDataBuilder, fixtures};
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let agent = builder.agent(0, AgentState::Healthy);
//! assert_eq!(agent.hostname, builder.hostname(0));
//!
//! let schema = fixtures::schema([("http_events", fixtures::relation([("time_", DataType::Time64ns)]))]);
//! assert!(schema.relation_map.contains_key("http_events"));
//! ```

use rpc::metadata::{AgentMetadata, AgentState};
use uuid::Uuid;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving all ids from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_agent_listing");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate the id of the `index`-th agent
    pub fn agent_id(&self, index: u32) -> Uuid {
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        uuid_bytes[8..12].copy_from_slice(&index.to_le_bytes());
        Uuid::from_bytes(uuid_bytes)
    }

    pub fn hostname(&self, index: u32) -> String {
        self.name("node", &index.to_string())
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("table", "main"), "test-table-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Metadata of the `index`-th agent in the given state
    pub fn agent(&self, index: u32, state: AgentState) -> AgentMetadata {
        AgentMetadata {
            agent_id: self.agent_id(index).to_string(),
            hostname: self.hostname(index),
            asid: index,
            state: state as i32,
            last_heartbeat_ns: i64::from(index) * 1_000_000,
            collects_data: true,
        }
    }
}

/// Schema builders
pub mod fixtures {
    use rpc::metadata::{ColumnInfo, DataType, Relation, Schema};

    pub fn column(name: &str, data_type: DataType) -> ColumnInfo {
        ColumnInfo {
            column_name: name.to_string(),
            column_type: data_type as i32,
            column_desc: String::new(),
        }
    }

    pub fn relation<'a>(columns: impl IntoIterator<Item = (&'a str, DataType)>) -> Relation {
        Relation {
            columns: columns
                .into_iter()
                .map(|(name, data_type)| column(name, data_type))
                .collect(),
            desc: String::new(),
        }
    }

    pub fn schema<'a>(relations: impl IntoIterator<Item = (&'a str, Relation)>) -> Schema {
        Schema {
            relation_map: relations
                .into_iter()
                .map(|(table, relation)| (table.to_string(), relation))
                .collect(),
        }
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a call failed with the given gRPC code, returning the status
    pub fn assert_status_code<T: std::fmt::Debug>(
        result: Result<T, tonic::Status>,
        code: tonic::Code,
        context: &str,
    ) -> tonic::Status {
        match result {
            Ok(value) => panic!("{}: expected {:?}, got Ok({:?})", context, code, value),
            Err(status) => {
                assert_eq!(
                    status.code(),
                    code,
                    "{}: unexpected status {:?}",
                    context,
                    status
                );
                status
            }
        }
    }
}
