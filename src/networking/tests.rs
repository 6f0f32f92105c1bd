//! Tests for the networking module

use super::{ip_availability, l7policies};
use crate::auth::AuthConfig;
use crate::http::HttpClient;
use crate::pagination::Page;
use crate::service::ServiceClient;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, ServiceClient) {
    let server = MockServer::start().await;
    let transport = Arc::new(
        HttpClient::with_auth(
            Default::default(),
            AuthConfig::Token {
                token: "net-token".to_string(),
            },
        )
        .unwrap(),
    );
    let client = ServiceClient::new(transport, &server.uri())
        .unwrap()
        .with_resource_base("v2.0")
        .unwrap();
    (server, client)
}

// ============================================================================
// L7 policy Tests
// ============================================================================

#[tokio::test]
async fn test_l7policies_follow_links() {
    let (server, client) = setup().await;
    let next = format!("{}/v2.0/lbaas/l7policies?limit=1&marker=8a1412f0", server.uri());

    Mock::given(method("GET"))
        .and(path("/v2.0/lbaas/l7policies"))
        .and(query_param("marker", "8a1412f0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "l7policies": [{
                "id": "953bbd2c",
                "name": "redirect-login",
                "listener_id": "023f2e34",
                "action": "REDIRECT_TO_URL",
                "position": 2,
                "redirect_url": "https://login.example.com",
                "admin_state_up": true,
                "rules": []
            }],
            "l7policies_links": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.0/lbaas/l7policies"))
        .and(wiremock::matchers::query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "l7policies": [{
                "id": "8a1412f0",
                "name": "redirect-example.com",
                "listener_id": "023f2e34",
                "action": "REDIRECT_TO_POOL",
                "position": 1,
                "redirect_pool_id": "bac433c6",
                "admin_state_up": true,
                "rules": [{
                    "id": "916faa5a",
                    "type": "HOST_NAME",
                    "compare_type": "EQUAL_TO",
                    "value": "www.example.com",
                    "invert": false
                }]
            }],
            "l7policies_links": [{"href": next, "rel": "next"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = l7policies::ListOpts {
        limit: Some(1),
        ..Default::default()
    };
    let policies = l7policies::list(&client, &opts)
        .unwrap()
        .all_items()
        .await
        .unwrap();

    let ids: Vec<&str> = policies.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["8a1412f0", "953bbd2c"]);
    assert_eq!(policies[0].rules[0].rule_type, "HOST_NAME");
    assert_eq!(policies[0].redirect_pool_id.as_deref(), Some("bac433c6"));
    assert_eq!(policies[1].position, 2);
}

// ============================================================================
// IP availability Tests
// ============================================================================

const IPV6_BODY: &str = r#"{
    "network_ip_availabilities": [{
        "network_id": "cf11ab78-2302-49fa-870f-851a08c7afb8",
        "network_name": "public",
        "project_id": "424e7cf0243c468ca61732ba45973b3e",
        "tenant_id": "424e7cf0243c468ca61732ba45973b3e",
        "total_ips": 18446744073709551617,
        "used_ips": 3,
        "subnet_ip_availability": [
            {
                "subnet_id": "4afe6e5f-9649-40db-b18f-64c7ead942bd",
                "subnet_name": "public-subnet",
                "cidr": "203.0.113.0/24",
                "ip_version": 4,
                "total_ips": 253,
                "used_ips": 2
            },
            {
                "subnet_id": "4d5d6b8d-5b7b-4c63-a8e6-3dc9b5d0c0d7",
                "subnet_name": "ipv6-public-subnet",
                "cidr": "2001:db8::/64",
                "ip_version": 6,
                "total_ips": 18446744073709551364,
                "used_ips": 1
            }
        ]
    }]
}"#;

#[tokio::test]
async fn test_ip_availability_list_decodes_ipv6_counts() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/network-ip-availabilities"))
        .and(query_param("ip_version", "6"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(IPV6_BODY, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let opts = ip_availability::ListOpts {
        ip_version: Some(6),
        ..Default::default()
    };
    let networks = ip_availability::list(&client, &opts)
        .unwrap()
        .all_items()
        .await
        .unwrap();

    assert_eq!(networks.len(), 1);
    let network = &networks[0];
    assert_eq!(network.total_ips, 18_446_744_073_709_551_617);
    assert_eq!(network.free_ips(), 18_446_744_073_709_551_614);
    assert_eq!(network.subnets[0].total_ips, 253);
    assert_eq!(network.subnets[1].ip_version, 6);
    assert_eq!(network.subnets[1].total_ips, 18_446_744_073_709_551_364);
}

#[tokio::test]
async fn test_ip_availability_get() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(
            "/v2.0/network-ip-availabilities/cf11ab78-2302-49fa-870f-851a08c7afb8",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "network_ip_availability": {
                "network_id": "cf11ab78-2302-49fa-870f-851a08c7afb8",
                "network_name": "private",
                "total_ips": 253,
                "used_ips": 3,
                "subnet_ip_availability": []
            }
        })))
        .mount(&server)
        .await;

    let network = ip_availability::get(&client, "cf11ab78-2302-49fa-870f-851a08c7afb8")
        .await
        .unwrap();
    assert_eq!(network.network_name, "private");
    assert_eq!(network.used_ips, 3);
    assert!(network.subnets.is_empty());
}

#[test]
fn test_ip_availability_page_is_single() {
    let response = crate::http::RawResponse {
        method: reqwest::Method::GET,
        url: url::Url::parse("http://localhost/v2.0/network-ip-availabilities").unwrap(),
        status: 200,
        headers: Default::default(),
        body: bytes::Bytes::from_static(br#"{"network_ip_availabilities": null}"#),
    };
    let page = ip_availability::NetworkIpAvailabilityPage::from_response(response).unwrap();
    assert!(page.is_empty());
    assert!(page.next_link().unwrap().is_none());
}
