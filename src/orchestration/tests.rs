//! Tests for the orchestration module

use super::build_info::{self, BuildInfo, Revision};
use crate::http::HttpClient;
use crate::service::ServiceClient;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_build_info() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/fake-project/build_info"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api": {"revision": "2.4.5"},
            "engine": {"revision": "1.2.1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ServiceClient::new(
        Arc::new(HttpClient::new().unwrap()),
        &format!("{}/v1/fake-project", server.uri()),
    )
    .unwrap();

    let info = build_info::get(&client).await.unwrap();
    assert_eq!(
        info,
        BuildInfo {
            api: Revision {
                revision: "2.4.5".to_string()
            },
            engine: Revision {
                revision: "1.2.1".to_string()
            },
        }
    );
}
