/// Integration tests for the REST binding with mocked ServiceObjects endpoints
/// Primary, backup and trial hosts are separate mock servers so call counts can be asserted
use lead_validation::{ClientConfig, LeadRequest, LvError, RestLeadValidator};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPERATION_PATH: &str = "/lv/api.svc/json/ValidateLead_V3";
const UNREACHABLE: &str = "http://127.0.0.1:1/lv/api.svc/json";
const LICENSE_KEY: &str = "test_key";

fn base_url(server: &MockServer) -> String {
    format!("{}/lv/api.svc/json", server.uri())
}

/// Helper function to create a validator pointing at the given REST bases
fn validator(primary: &str, backup: &str, trial: &str) -> RestLeadValidator {
    let config = ClientConfig {
        rest_primary_url: primary.to_string(),
        rest_backup_url: backup.to_string(),
        rest_trial_url: trial.to_string(),
        ..ClientConfig::default()
    };
    RestLeadValidator::with_config(config).unwrap()
}

fn tim_cook() -> LeadRequest {
    LeadRequest::new("business-noip")
        .with_full_name("Tim Cook")
        .with_business_name("Apple")
        .with_address1("27 E Cota St")
        .with_locality("Cupertino")
        .with_admin_area("CA")
        .with_postal_code("93101")
        .with_country("US")
        .with_email("tim.cook@apple.com")
}

async fn mount_json(server: &MockServer, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_primary_success_never_calls_backup() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    mount_json(&primary, json!({"OverallCertainty": "High", "Error": null}), 1).await;
    mount_json(&backup, json!({"OverallCertainty": "Medium"}), 0).await;

    let result = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("High"));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_fatal_type_code_fails_over_to_backup() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    mount_json(
        &primary,
        json!({"Error": {"Type": "Service Objects Fatal", "TypeCode": "3", "Desc": "Unhandled error", "DescCode": "1"}}),
        1,
    )
    .await;
    mount_json(&backup, json!({"OverallCertainty": "Medium"}), 1).await;

    let result = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("Medium"));
}

#[tokio::test]
async fn test_advisory_error_is_returned_without_retry() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    mount_json(
        &primary,
        json!({
            "OverallCertainty": "Low",
            "Error": {"Type": "User", "TypeCode": "2", "Desc": "Invalid email", "DescCode": "7"}
        }),
        1,
    )
    .await;
    mount_json(&backup, json!({"OverallCertainty": "Medium"}), 0).await;

    let result = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("Low"));
    let error = result.error.unwrap();
    assert_eq!(error.type_code.as_deref(), Some("2"));
    assert_eq!(error.desc.as_deref(), Some("Invalid email"));
}

#[tokio::test]
async fn test_connection_error_on_primary_uses_backup() {
    let backup = MockServer::start().await;
    mount_json(&backup, json!({"OverallCertainty": "High"}), 1).await;

    let result = validator(UNREACHABLE, &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("High"));
}

#[tokio::test]
async fn test_http_error_status_uses_backup() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&primary)
        .await;
    mount_json(&backup, json!({"OverallCertainty": "High"}), 1).await;

    let result = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("High"));
}

#[tokio::test]
async fn test_malformed_json_is_retried_once_on_backup() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"OverallCertainty\": "))
        .expect(1)
        .mount(&primary)
        .await;
    mount_json(&backup, json!({"OverallCertainty": "Medium"}), 1).await;

    let result = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("Medium"));
}

#[tokio::test]
async fn test_trial_connection_error_is_terminal() {
    let backup = MockServer::start().await;
    mount_json(&backup, json!({"OverallCertainty": "High"}), 0).await;

    let err = validator(UNREACHABLE, &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, false)
        .await
        .unwrap_err();

    match err {
        LvError::TrialTerminal(cause) => assert!(cause.is_transport()),
        other => panic!("expected TrialTerminal, got {:?}", other),
    }
}

#[tokio::test]
async fn test_trial_fatal_error_is_terminal() {
    let trial = MockServer::start().await;
    mount_json(&trial, json!({"Error": {"TypeCode": "3"}}), 1).await;

    let err = validator(UNREACHABLE, UNREACHABLE, &base_url(&trial))
        .validate_lead(&tim_cook(), LICENSE_KEY, false)
        .await
        .unwrap_err();

    match err {
        LvError::TrialTerminal(cause) => {
            assert!(matches!(*cause, LvError::ServiceFatal { .. }))
        }
        other => panic!("expected TrialTerminal, got {:?}", other),
    }
}

#[tokio::test]
async fn test_both_endpoints_unreachable() {
    let err = validator(UNREACHABLE, "http://127.0.0.1:2/lv/api.svc/json", UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap_err();

    match &err {
        LvError::BothEndpointsFailed { primary, backup } => {
            assert!(primary.is_transport());
            assert!(backup.is_transport());
        }
        other => panic!("expected BothEndpointsFailed, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("127.0.0.1:1"));
    assert!(message.contains("127.0.0.1:2"));
}

#[tokio::test]
async fn test_backup_fatal_counts_as_failure() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    mount_json(&primary, json!({"Error": {"TypeCode": "3"}}), 1).await;
    mount_json(&backup, json!({"Error": {"TypeCode": "3"}}), 1).await;

    let err = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap_err();

    assert!(err.is_both_failed());
}

#[tokio::test]
async fn test_empty_body_fails_over() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&primary)
        .await;
    mount_json(&backup, json!({"OverallCertainty": "High"}), 1).await;

    let result = validator(&base_url(&primary), &base_url(&backup), UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("High"));
}

#[tokio::test]
async fn test_query_parameters_are_sent_in_service_casing() {
    let primary = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .and(query_param("FullName", "Tim Cook"))
        .and(query_param("BusinessName", "Apple"))
        .and(query_param("Address1", "27 E Cota St"))
        .and(query_param("AdminArea", "CA"))
        .and(query_param("Email", "tim.cook@apple.com"))
        .and(query_param("Phone2", ""))
        .and(query_param("TestType", "business-noip"))
        .and(query_param("LicenseKey", LICENSE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"OverallCertainty": "High"})))
        .expect(1)
        .mount(&primary)
        .await;

    let result = validator(&base_url(&primary), UNREACHABLE, UNREACHABLE)
        .validate_lead(&tim_cook(), LICENSE_KEY, true)
        .await
        .unwrap();

    assert_eq!(result.overall_certainty.as_deref(), Some("High"));
}

#[tokio::test]
async fn test_concurrent_validations_are_independent() {
    let primary = MockServer::start().await;
    mount_json(&primary, json!({"OverallCertainty": "High"}), 10).await;

    let validator = validator(&base_url(&primary), UNREACHABLE, UNREACHABLE);

    // Fire 10 concurrent requests through one shared validator
    let mut handles = vec![];
    for _ in 0..10 {
        let validator = validator.clone();
        handles.push(tokio::spawn(async move {
            validator.validate_lead(&tim_cook(), LICENSE_KEY, true).await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }
}
