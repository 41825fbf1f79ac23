//! Integration tests for `IncentiveClient` using wiremock HTTP mocks.

use ptk_api::{ApiError, ClientConfig, IncentiveClient, NewIncentive};
use ptk_core::IncentiveType;
use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> IncentiveClient {
    let config = ClientConfig {
        max_retries: 0,
        ..ClientConfig::new(base_url)
    };
    IncentiveClient::new(&config).expect("client construction should not fail")
}

fn veteran_discount(id: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "business_id": "b1",
        "is_available": true,
        "type": "VT",
        "amount": 10.0,
        "discount_type": "percentage",
        "information": "Show military ID",
        "created_at": "2024-05-01T12:00:00Z"
    })
}

#[tokio::test]
async fn for_business_returns_incentives() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "results": [veteran_discount("i1")] });

    Mock::given(method("GET"))
        .and(path("/combined-api"))
        .and(query_param("operation", "incentives"))
        .and(query_param("business_id", "b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let incentives = client.for_business("b1").await.expect("should parse");

    assert_eq!(incentives.len(), 1);
    assert_eq!(incentives[0].id, "i1");
    let detail = incentives[0].detail.as_ref().expect("available detail");
    assert_eq!(detail.kind, IncentiveType::Veteran);
    assert_eq!(detail.amount, Decimal::from(10));
}

#[tokio::test]
async fn for_business_empty_result_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/combined-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let incentives = client.for_business("b1").await.expect("empty is valid");
    assert!(incentives.is_empty());
}

#[tokio::test]
async fn for_chain_filters_inactive_entries() {
    let server = MockServer::start().await;

    let mut inactive = veteran_discount("i2");
    inactive["is_active"] = serde_json::json!(false);
    let mut active = veteran_discount("i3");
    active["is_active"] = serde_json::json!(true);
    active["type"] = serde_json::json!("AD");
    let body = serde_json::json!({ "incentives": [inactive, active, veteran_discount("i4")] });

    Mock::given(method("GET"))
        .and(path("/chains"))
        .and(query_param("operation", "incentives"))
        .and(query_param("chain_id", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let incentives = client.for_chain("c1").await.expect("should parse");

    // i2 is dropped; i4 has no flag and is kept.
    let ids: Vec<&str> = incentives.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["i3", "i4"]);
}

#[tokio::test]
async fn unavailable_incentive_keeps_no_detail() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": [{ "_id": "i9", "business_id": "b1", "is_available": false }]
    });

    Mock::given(method("GET"))
        .and(path("/combined-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let incentives = client.for_business("b1").await.unwrap();
    assert_eq!(incentives.len(), 1);
    assert!(!incentives[0].is_available);
    assert!(incentives[0].detail.is_none());
}

#[tokio::test]
async fn create_posts_record_and_returns_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/incentives"))
        .and(wiremock::matchers::header("authorization", "Bearer tok-9"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({ "result": veteran_discount("i10") })),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_auth_token("tok-9");
    let client = IncentiveClient::new(&config).unwrap();

    let new = NewIncentive {
        business_id: Some("b1".to_string()),
        is_available: true,
        incentive_type: Some("VT".to_string()),
        other_description: None,
        amount: Some(Decimal::from(10)),
        discount_type: Some("percentage".to_string()),
        information: Some("Show military ID".to_string()),
    };

    let created = client.create(&new).await.expect("should create");
    assert_eq!(created.id, "i10");
}

#[tokio::test]
async fn update_rejected_with_message_payload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/incentives/i1"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "message": "amount out of range" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let new = NewIncentive {
        business_id: Some("b1".to_string()),
        is_available: true,
        incentive_type: Some("VT".to_string()),
        other_description: None,
        amount: Some(Decimal::from(900)),
        discount_type: Some("percentage".to_string()),
        information: Some("x".to_string()),
    };

    let result = client.update("i1", &new).await;
    match result {
        Err(ApiError::Api(message)) => assert_eq!(message, "amount out of range"),
        other => panic!("expected Api error, got {other:?}"),
    }
}
