//! Mock [`MetadataServiceClient`] for unit tests.
//!
//! Declare expected calls through [`MockMetadataServiceClient::expect`], hand
//! the mock (or a clone of it) to the code under test, and let the mock verify
//! the expectations when the last clone is dropped.
//!
//! ```ignore
//! use metadata_mock::MockMetadataServiceClient;
//! use mock_recorder::{any, eq};
//! use rpc::metadata::{SchemaByAgentRequest, SchemaResponse};
//!
//! let mock = MockMetadataServiceClient::new();
//! mock.expect().get_schemas(any()).return_const(SchemaResponse::default());
//! mock.expect()
//!     .get_schema_by_agent(eq(SchemaByAgentRequest { agent_id: "a1".into() }))
//!     .return_err(tonic::Status::not_found("unknown agent"));
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use mock_recorder::{Controller, FailureReporter, PanicReporter, RecorderConfig};
use rpc::metadata::{
    AgentInfoRequest, AgentInfoResponse, SchemaByAgentRequest, SchemaByAgentResponse,
    SchemaRequest, SchemaResponse,
};
use rpc::{CallContext, CallOption, MetadataServiceClient};

mock_recorder::mock_interface! {
    /// `metadata.v1.MetadataService` as seen by the mock controller
    pub interface MetadataService {
        context: CallContext,
        option: CallOption,
        error: tonic::Status,
        calls: MetadataCall,
        replies: MetadataReply,
        recorder: MockMetadataServiceClientRecorder,
        methods {
            GetAgentInfo => get_agent_info(AgentInfoRequest) -> AgentInfoResponse;
            GetSchemaByAgent => get_schema_by_agent(SchemaByAgentRequest) -> SchemaByAgentResponse;
            GetSchemas => get_schemas(SchemaRequest) -> SchemaResponse;
        }
    }
}

/// Mock of [`MetadataServiceClient`]
///
/// Clones share one controller, so expectations declared on any clone apply
/// to all of them.
#[derive(Clone)]
pub struct MockMetadataServiceClient {
    controller: Arc<Controller<MetadataService>>,
    recorder: MockMetadataServiceClientRecorder,
}

impl MockMetadataServiceClient {
    /// Mock that panics on framework failures, configured from the environment
    pub fn new() -> Self {
        Self::with_reporter(PanicReporter)
    }

    pub fn with_reporter(reporter: impl FailureReporter + 'static) -> Self {
        Self::from_controller(Controller::new(reporter))
    }

    pub fn with_config(reporter: impl FailureReporter + 'static, config: RecorderConfig) -> Self {
        Self::from_controller(Controller::with_config(reporter, config))
    }

    fn from_controller(controller: Controller<MetadataService>) -> Self {
        let controller = Arc::new(controller);
        Self {
            recorder: MockMetadataServiceClientRecorder::new(controller.clone()),
            controller,
        }
    }

    /// Object that allows the caller to indicate expected use
    pub fn expect(&self) -> &MockMetadataServiceClientRecorder {
        &self.recorder
    }

    /// Call log and verification
    pub fn controller(&self) -> &Controller<MetadataService> {
        &self.controller
    }

    pub fn verify(&self) {
        self.controller.verify();
    }
}

impl Default for MockMetadataServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataServiceClient for MockMetadataServiceClient {
    async fn get_agent_info(
        &self,
        ctx: CallContext,
        request: AgentInfoRequest,
        options: Vec<CallOption>,
    ) -> Result<AgentInfoResponse, tonic::Status> {
        self.controller.invoke::<GetAgentInfo>(ctx, request, options)
    }

    async fn get_schema_by_agent(
        &self,
        ctx: CallContext,
        request: SchemaByAgentRequest,
        options: Vec<CallOption>,
    ) -> Result<SchemaByAgentResponse, tonic::Status> {
        self.controller
            .invoke::<GetSchemaByAgent>(ctx, request, options)
    }

    async fn get_schemas(
        &self,
        ctx: CallContext,
        request: SchemaRequest,
        options: Vec<CallOption>,
    ) -> Result<SchemaResponse, tonic::Status> {
        self.controller.invoke::<GetSchemas>(ctx, request, options)
    }
}
