use async_trait::async_trait;

use crate::context::CallContext;
use crate::metadata::{
    AgentInfoRequest, AgentInfoResponse, SchemaByAgentRequest, SchemaByAgentResponse,
    SchemaRequest, SchemaResponse,
};
use crate::options::CallOption;

/// Client-side call surface of `metadata.v1.MetadataService`
///
/// Every operation takes the call context, one request message and an
/// open-ended list of trailing options.
#[async_trait]
pub trait MetadataServiceClient: Send + Sync {
    /// Metadata of every agent known to the service
    async fn get_agent_info(
        &self,
        ctx: CallContext,
        request: AgentInfoRequest,
        options: Vec<CallOption>,
    ) -> Result<AgentInfoResponse, tonic::Status>;

    /// Schemas reported by each agent
    async fn get_schema_by_agent(
        &self,
        ctx: CallContext,
        request: SchemaByAgentRequest,
        options: Vec<CallOption>,
    ) -> Result<SchemaByAgentResponse, tonic::Status>;

    /// Merged schema of all tables
    async fn get_schemas(
        &self,
        ctx: CallContext,
        request: SchemaRequest,
        options: Vec<CallOption>,
    ) -> Result<SchemaResponse, tonic::Status>;
}
