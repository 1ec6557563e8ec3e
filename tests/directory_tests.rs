// Directory client tests against a mocked HTTP server

use circle_algo::services::{DirectoryClient, DirectoryError};

#[tokio::test]
async fn test_get_eligible_members_parses_rows() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!([
        {
            "id": "alice",
            "name": "Alice",
            "member_profiles": [
                {
                    "industry": "SaaS",
                    "expertise_areas": ["Product Design", "UI/UX"],
                    "looking_for": "Growth strategies"
                }
            ],
            "subscriptions": [
                { "status": "active", "tier": "basic" }
            ]
        },
        {
            "id": "dave",
            "name": "Dave",
            "member_profiles": [
                { "industry": null, "expertise_areas": [], "looking_for": null }
            ],
            "subscriptions": [
                { "status": "active", "tier": "prestige" }
            ]
        }
    ]);

    let mock = server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/v1/members.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "service-key".to_string());
    let rows = client.get_eligible_members().await.unwrap();

    mock.assert_async().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id.as_deref(), Some("alice"));
    assert_eq!(rows[0].profiles.len(), 1);
    assert_eq!(
        rows[0].profiles[0].looking_for.as_deref(),
        Some("Growth strategies")
    );
    assert_eq!(rows[1].subscriptions.len(), 1);
}

#[tokio::test]
async fn test_unauthorized_is_surfaced() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/v1/members.*".to_string()))
        .with_status(401)
        .with_body(r#"{"message": "invalid key"}"#)
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "wrong-key".to_string());
    let err = client.get_eligible_members().await.unwrap_err();

    assert!(matches!(err, DirectoryError::Unauthorized));
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/v1/members.*".to_string()))
        .with_status(503)
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "service-key".to_string());
    let err = client.get_eligible_members().await.unwrap_err();

    assert!(matches!(err, DirectoryError::ApiError(_)));
}

#[tokio::test]
async fn test_malformed_payload_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", mockito::Matcher::Regex(r"^/rest/v1/members.*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"documents": "not an array"}"#)
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "service-key".to_string());
    let err = client.get_eligible_members().await.unwrap_err();

    assert!(matches!(err, DirectoryError::InvalidResponse(_)));
}
