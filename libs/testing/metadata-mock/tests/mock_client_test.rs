//! Tests for the mocked MetadataServiceClient
//!
//! These tests exercise the mock the way service code uses the real client:
//! through the `MetadataServiceClient` trait, with expectations declared up
//! front and verified at the end.

use std::time::Duration;

use metadata_mock::{GetAgentInfo, GetSchemaByAgent, MockMetadataServiceClient};
use mock_recorder::{
    CollectingReporter, MockFailure, RecorderConfig, Sequence, Times, any, eq, function,
    init_test_tracing,
};
use rpc::metadata::{
    AgentInfoRequest, AgentInfoResponse, AgentSchema, AgentState, DataType, SchemaByAgentRequest,
    SchemaByAgentResponse, SchemaRequest, SchemaResponse,
};
use rpc::{CallContext, CallOption, MetadataServiceClient};
use test_utils::{TestDataBuilder, assertions::*, fixtures};

// Helper: mock that records failures instead of panicking, no verification on drop
fn collecting_mock() -> (MockMetadataServiceClient, CollectingReporter) {
    init_test_tracing();
    let reporter = CollectingReporter::new();
    let mock = MockMetadataServiceClient::with_config(
        reporter.clone(),
        RecorderConfig::default().with_verify_on_drop(false),
    );
    (mock, reporter)
}

// An example application function: list table names known to the service
async fn table_names(client: &impl MetadataServiceClient) -> Result<Vec<String>, tonic::Status> {
    let response = client
        .get_schemas(CallContext::background(), SchemaRequest {}, vec![])
        .await?;

    let mut names: Vec<String> = response
        .schema
        .map(|schema| schema.relation_map.into_keys().collect())
        .unwrap_or_default();
    names.sort();
    Ok(names)
}

// An example application function: hostnames of healthy agents
async fn healthy_hosts(client: &impl MetadataServiceClient) -> Result<Vec<String>, tonic::Status> {
    let response = client
        .get_agent_info(
            CallContext::background().with_timeout(Duration::from_secs(2)),
            AgentInfoRequest {},
            vec![CallOption::Timeout(Duration::from_secs(2))],
        )
        .await?;

    Ok(response
        .info
        .into_iter()
        .filter(|agent| agent.state() == AgentState::Healthy)
        .map(|agent| agent.hostname)
        .collect())
}

// ============================================================================
// Scripted results
// ============================================================================

#[tokio::test]
async fn test_get_schemas_returns_empty_response() {
    init_test_tracing();
    let mock = MockMetadataServiceClient::new();
    mock.expect()
        .get_schemas(any())
        .return_const(SchemaResponse::default());

    let response = mock
        .get_schemas(CallContext::background(), SchemaRequest {}, vec![])
        .await
        .unwrap();

    assert_eq!(response, SchemaResponse::default());
    mock.verify();
}

#[tokio::test]
async fn test_application_reads_scripted_schema() {
    let mock = MockMetadataServiceClient::new();
    let schema = fixtures::schema([
        ("process_stats", fixtures::relation([("upid", DataType::Uint128)])),
        (
            "http_events",
            fixtures::relation([("time_", DataType::Time64ns), ("req_path", DataType::String)]),
        ),
    ]);
    mock.expect().get_schemas(any()).return_const(SchemaResponse {
        schema: Some(schema),
    });

    let names = table_names(&mock).await.unwrap();

    assert_eq!(names, vec!["http_events", "process_stats"]);
}

#[tokio::test]
async fn test_application_filters_agents() {
    let mock = MockMetadataServiceClient::new();
    let builder = TestDataBuilder::from_test_name("filters_agents");
    let response = AgentInfoResponse {
        info: vec![
            builder.agent(0, AgentState::Healthy),
            builder.agent(1, AgentState::Unresponsive),
            builder.agent(2, AgentState::Healthy),
        ],
    };
    mock.expect().get_agent_info(any()).return_const(response);

    let hosts = healthy_hosts(&mock).await.unwrap();

    assert_eq!(hosts, vec![builder.hostname(0), builder.hostname(2)]);
}

#[tokio::test]
async fn test_scripted_error_is_returned_verbatim() {
    let (mock, reporter) = collecting_mock();
    mock.expect()
        .get_schemas(any())
        .return_err(tonic::Status::unavailable("metadata service is restarting"));

    let status = assert_status_code(table_names(&mock).await, tonic::Code::Unavailable, "schemas");

    assert_eq!(status.message(), "metadata service is restarting");
    assert!(reporter.is_empty());
}

#[tokio::test]
async fn test_returning_computes_response_from_request() {
    let mock = MockMetadataServiceClient::new();
    let builder = TestDataBuilder::from_test_name("returning");
    mock.expect()
        .get_schema_by_agent(any())
        .times(Times::exactly(2))
        .returning(|request| {
            Ok(SchemaByAgentResponse {
                schemas: vec![AgentSchema {
                    agent_id: request.agent_id.clone(),
                    schema: None,
                }],
            })
        });

    for index in 0..2 {
        let agent_id = builder.agent_id(index).to_string();
        let response = mock
            .get_schema_by_agent(
                CallContext::background(),
                SchemaByAgentRequest {
                    agent_id: agent_id.clone(),
                },
                vec![],
            )
            .await
            .unwrap();
        assert_eq!(response.schemas[0].agent_id, agent_id);
    }
}

// ============================================================================
// Matching
// ============================================================================

#[tokio::test]
async fn test_exact_request_matching() {
    let mock = MockMetadataServiceClient::new();
    let builder = TestDataBuilder::from_test_name("exact_matching");
    let known = SchemaByAgentRequest {
        agent_id: builder.agent_id(0).to_string(),
    };
    let unknown = SchemaByAgentRequest {
        agent_id: builder.agent_id(1).to_string(),
    };
    mock.expect()
        .get_schema_by_agent(eq(known.clone()))
        .return_const(SchemaByAgentResponse::default());
    mock.expect()
        .get_schema_by_agent(eq(unknown.clone()))
        .return_err(tonic::Status::not_found("unknown agent"));

    // Distinct expectations match regardless of call order
    let missing = mock
        .get_schema_by_agent(CallContext::background(), unknown, vec![])
        .await;
    assert_status_code(missing, tonic::Code::NotFound, "unknown agent");

    let found = mock
        .get_schema_by_agent(CallContext::background(), known, vec![])
        .await;
    assert!(found.is_ok());
}

#[tokio::test]
async fn test_trailing_options_do_not_affect_matching() {
    let mock = MockMetadataServiceClient::new();
    mock.expect().get_schemas(any()).times(Times::exactly(3));

    let option_lists = [
        vec![],
        vec![CallOption::Timeout(Duration::from_secs(1))],
        vec![
            CallOption::header("x-tenant", "pixie"),
            CallOption::Compression(tonic::codec::CompressionEncoding::Zstd),
            CallOption::MaxDecodingMessageSize(16 * 1024 * 1024),
        ],
    ];
    for options in option_lists {
        mock.get_schemas(CallContext::background(), SchemaRequest {}, options)
            .await
            .unwrap();
    }

    mock.controller().with_calls(|calls| {
        let lengths: Vec<usize> = calls.iter().map(|call| call.options().len()).collect();
        assert_eq!(lengths, vec![0, 1, 3]);
    });
}

#[tokio::test]
async fn test_context_matcher() {
    let (mock, reporter) = collecting_mock();
    let request_id = uuid::Uuid::new_v4();
    mock.expect()
        .get_agent_info(any())
        .with_context(function("traced request", move |ctx: &CallContext| {
            ctx.request_id() == request_id
        }));

    let untraced = mock
        .get_agent_info(CallContext::background(), AgentInfoRequest {}, vec![])
        .await;
    assert_status_code(untraced, tonic::Code::Unimplemented, "untraced");

    let traced = mock
        .get_agent_info(
            CallContext::background().with_request_id(request_id),
            AgentInfoRequest {},
            vec![],
        )
        .await;
    assert!(traced.is_ok());
    assert_eq!(reporter.failures().len(), 1);
}

// ============================================================================
// Framework failures
// ============================================================================

#[tokio::test]
#[should_panic(expected = "GetAgentInfo")]
async fn test_unregistered_call_fails_immediately() {
    let mock = MockMetadataServiceClient::with_config(
        mock_recorder::PanicReporter,
        RecorderConfig::default(),
    );

    let _ = mock
        .get_agent_info(CallContext::background(), AgentInfoRequest {}, vec![])
        .await;
}

#[tokio::test]
async fn test_unregistered_call_is_reported_with_method_name() {
    let (mock, reporter) = collecting_mock();

    let result = mock
        .get_agent_info(CallContext::background(), AgentInfoRequest {}, vec![])
        .await;

    let status = assert_status_code(result, tonic::Code::Unimplemented, "unregistered");
    assert!(status.message().contains("MetadataService.GetAgentInfo"));

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], MockFailure::UnexpectedCall { method: "GetAgentInfo", .. }));
}

#[tokio::test]
async fn test_exceeding_call_count_is_reported() {
    let (mock, reporter) = collecting_mock();
    mock.expect().get_schemas(any());

    assert!(table_names(&mock).await.is_ok());
    assert_status_code(table_names(&mock).await, tonic::Code::FailedPrecondition, "second call");

    assert!(matches!(
        reporter.failures()[0],
        MockFailure::CallCountExceeded {
            method: "GetSchemas",
            actual: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn test_verify_reports_missing_calls() {
    let (mock, reporter) = collecting_mock();
    mock.expect().get_schemas(any());
    mock.expect()
        .get_agent_info(any())
        .times(Times::at_least(2));

    let _ = healthy_hosts(&mock).await;
    mock.verify();

    let failures = reporter.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].method(), "GetSchemas");
    assert!(matches!(
        failures[1],
        MockFailure::Unsatisfied {
            method: "GetAgentInfo",
            actual: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn test_unmet_expectation_fails_when_mock_is_dropped() {
    let reporter = CollectingReporter::new();
    {
        let mock = MockMetadataServiceClient::with_config(reporter.clone(), RecorderConfig::default());
        let clone = mock.clone();
        mock.expect().get_agent_info(any());
        drop(mock);

        // Still alive through the clone
        assert!(reporter.is_empty());
        drop(clone);
    }

    assert_eq!(reporter.failures().len(), 1);
}

#[tokio::test]
#[should_panic(expected = "Missing call(s) to MetadataService.GetSchemas")]
async fn test_drop_panics_with_default_reporter() {
    let mock = MockMetadataServiceClient::with_config(
        mock_recorder::PanicReporter,
        RecorderConfig::default(),
    );
    mock.expect().get_schemas(any());
}

// ============================================================================
// Ordering and call records
// ============================================================================

#[tokio::test]
async fn test_sequence_enforces_call_order() {
    let (mock, reporter) = collecting_mock();
    let mut seq = Sequence::new();
    mock.expect().get_agent_info(any()).in_sequence(&mut seq);
    mock.expect().get_schemas(any()).in_sequence(&mut seq);

    assert_status_code(table_names(&mock).await, tonic::Code::FailedPrecondition, "early");
    assert!(healthy_hosts(&mock).await.is_ok());
    assert!(table_names(&mock).await.is_ok());

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], MockFailure::OutOfOrder { method: "GetSchemas", .. }));
}

#[tokio::test]
async fn test_call_records_expose_requests() {
    let mock = MockMetadataServiceClient::new();
    let builder = TestDataBuilder::from_test_name("call_records");
    mock.expect()
        .get_schema_by_agent(any())
        .times(Times::any());
    mock.expect().get_agent_info(any()).never();

    for index in 0..3 {
        mock.get_schema_by_agent(
            CallContext::background(),
            SchemaByAgentRequest {
                agent_id: builder.agent_id(index).to_string(),
            },
            vec![],
        )
        .await
        .unwrap();
    }

    let controller = mock.controller();
    assert_eq!(controller.call_count(), 3);
    assert_eq!(controller.call_count_of("GetSchemaByAgent"), 3);
    assert_eq!(controller.call_count_of("GetAgentInfo"), 0);
    assert!(controller.requests::<GetAgentInfo>().is_empty());

    let requests = controller.requests::<GetSchemaByAgent>();
    let last = assert_some(requests.last(), "last request");
    assert_eq!(last.agent_id, builder.agent_id(2).to_string());
}
