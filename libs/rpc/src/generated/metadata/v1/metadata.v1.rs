// @generated
// This file is @generated by prost-build.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct AgentInfoRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AgentInfoResponse {
    #[prost(message, repeated, tag = "1")]
    pub info: ::prost::alloc::vec::Vec<AgentMetadata>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct AgentMetadata {
    #[prost(string, tag = "1")]
    pub agent_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub hostname: ::prost::alloc::string::String,
    #[prost(uint32, tag = "3")]
    pub asid: u32,
    #[prost(enumeration = "AgentState", tag = "4")]
    pub state: i32,
    #[prost(int64, tag = "5")]
    pub last_heartbeat_ns: i64,
    #[prost(bool, tag = "6")]
    pub collects_data: bool,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct SchemaByAgentRequest {
    #[prost(string, tag = "1")]
    pub agent_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SchemaByAgentResponse {
    #[prost(message, repeated, tag = "1")]
    pub schemas: ::prost::alloc::vec::Vec<AgentSchema>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AgentSchema {
    #[prost(string, tag = "1")]
    pub agent_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub schema: ::core::option::Option<Schema>,
}
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct SchemaRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SchemaResponse {
    #[prost(message, optional, tag = "1")]
    pub schema: ::core::option::Option<Schema>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Schema {
    #[prost(map = "string, message", tag = "1")]
    pub relation_map: ::std::collections::HashMap<::prost::alloc::string::String, Relation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Relation {
    #[prost(message, repeated, tag = "1")]
    pub columns: ::prost::alloc::vec::Vec<ColumnInfo>,
    #[prost(string, tag = "2")]
    pub desc: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ColumnInfo {
    #[prost(string, tag = "1")]
    pub column_name: ::prost::alloc::string::String,
    #[prost(enumeration = "DataType", tag = "2")]
    pub column_type: i32,
    #[prost(string, tag = "3")]
    pub column_desc: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AgentState {
    Unknown = 0,
    Healthy = 1,
    Unresponsive = 2,
    Disconnected = 3,
}
impl AgentState {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unknown => "AGENT_STATE_UNKNOWN",
            Self::Healthy => "AGENT_STATE_HEALTHY",
            Self::Unresponsive => "AGENT_STATE_UNRESPONSIVE",
            Self::Disconnected => "AGENT_STATE_DISCONNECTED",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "AGENT_STATE_UNKNOWN" => Some(Self::Unknown),
            "AGENT_STATE_HEALTHY" => Some(Self::Healthy),
            "AGENT_STATE_UNRESPONSIVE" => Some(Self::Unresponsive),
            "AGENT_STATE_DISCONNECTED" => Some(Self::Disconnected),
            _ => None,
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    Unknown = 0,
    Boolean = 1,
    Int64 = 2,
    Uint128 = 3,
    Float64 = 4,
    String = 5,
    Time64ns = 6,
}
impl DataType {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unknown => "DATA_TYPE_UNKNOWN",
            Self::Boolean => "BOOLEAN",
            Self::Int64 => "INT64",
            Self::Uint128 => "UINT128",
            Self::Float64 => "FLOAT64",
            Self::String => "STRING",
            Self::Time64ns => "TIME64NS",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "DATA_TYPE_UNKNOWN" => Some(Self::Unknown),
            "BOOLEAN" => Some(Self::Boolean),
            "INT64" => Some(Self::Int64),
            "UINT128" => Some(Self::Uint128),
            "FLOAT64" => Some(Self::Float64),
            "STRING" => Some(Self::String),
            "TIME64NS" => Some(Self::Time64ns),
            _ => None,
        }
    }
}
