//! Tests for the load balancer module

use super::*;
use crate::http::HttpClient;
use crate::pagination::Page;
use crate::service::ServiceClient;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LB_ID: &str = "36e08a3e-a78f-4b40-a229-1e7e23eee1ab";

fn db_lb(provisioning_status: &str) -> Value {
    json!({
        "id": LB_ID,
        "project_id": "54030507-44f7-473c-9342-b4d14a95f692",
        "created_at": "2019-06-30T04:15:37",
        "updated_at": "2019-06-30T05:18:49",
        "name": "db_lb",
        "description": "lb config for the db tier",
        "vip_subnet_id": "9cedb85d-0759-4898-8a4b-fa5a5ea10086",
        "vip_address": "10.30.176.48",
        "vip_port_id": "2bf413c8-41a9-4477-b505-333d5cbe8b55",
        "flavor_id": "bba40eb2-ee8c-11e9-81b4-2a2ae2dbcce4",
        "provider": "haproxy",
        "admin_state_up": true,
        "provisioning_status": provisioning_status,
        "operating_status": "OFFLINE",
        "tags": ["test", "stage"]
    })
}

async fn setup() -> (MockServer, ServiceClient) {
    let server = MockServer::start().await;
    let transport = Arc::new(
        HttpClient::with_auth(
            Default::default(),
            crate::auth::AuthConfig::Token {
                token: "cbc36478b0bd8e67e89469c7749d4127".to_string(),
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

#[tokio::test]
async fn test_list_load_balancers() {
    let (server, client) = setup().await;

    let mut web = db_lb("ACTIVE");
    web["id"] = json!("c331058c-6a40-4144-948e-b9fb1df9db4b");
    web["name"] = json!("web_lb");

    Mock::given(method("GET"))
        .and(path("/v2.0/lbaas/loadbalancers"))
        .and(header("X-Auth-Token", "cbc36478b0bd8e67e89469c7749d4127"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loadbalancers": [web, db_lb("PENDING_CREATE")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut pages = 0;
    list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|page| {
            pages += 1;
            let names: Vec<&str> = page.items().iter().map(|lb| lb.name.as_str()).collect();
            assert_eq!(names, vec!["web_lb", "db_lb"]);
            Ok(true)
        })
        .await
        .unwrap();
    assert_eq!(pages, 1);
}

#[tokio::test]
async fn test_list_filters_become_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/lbaas/loadbalancers"))
        .and(query_param("name", "db_lb"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loadbalancers": [db_lb("ACTIVE")],
            "loadbalancers_links": []
        })))
        .mount(&server)
        .await;

    let opts = ListOpts {
        name: Some("db_lb".to_string()),
        limit: Some(1),
        ..Default::default()
    };
    let all = list(&client, &opts).unwrap().all_items().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, LB_ID);
}

#[tokio::test]
async fn test_create_load_balancer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/lbaas/loadbalancers"))
        .and(body_json(json!({
            "loadbalancer": {
                "name": "db_lb",
                "vip_port_id": "2bf413c8-41a9-4477-b505-333d5cbe8b55",
                "vip_subnet_id": "9cedb85d-0759-4898-8a4b-fa5a5ea10086",
                "vip_address": "10.30.176.48",
                "flavor_id": "bba40eb2-ee8c-11e9-81b4-2a2ae2dbcce4",
                "provider": "haproxy",
                "admin_state_up": true,
                "tags": ["test", "stage"]
            }
        })))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"loadbalancer": db_lb("PENDING_CREATE")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let opts = CreateOpts {
        name: Some("db_lb".to_string()),
        vip_port_id: Some("2bf413c8-41a9-4477-b505-333d5cbe8b55".to_string()),
        vip_subnet_id: Some("9cedb85d-0759-4898-8a4b-fa5a5ea10086".to_string()),
        vip_address: Some("10.30.176.48".to_string()),
        flavor_id: Some("bba40eb2-ee8c-11e9-81b4-2a2ae2dbcce4".to_string()),
        provider: Some("haproxy".to_string()),
        admin_state_up: Some(true),
        tags: vec!["test".to_string(), "stage".to_string()],
        ..Default::default()
    };

    let lb = create(&client, &opts).await.unwrap();
    assert_eq!(lb.name, "db_lb");
    assert_eq!(lb.provisioning_status, "PENDING_CREATE");
    assert_eq!(lb.tags, vec!["test", "stage"]);
}

#[tokio::test]
async fn test_create_requires_vip() {
    let (_server, client) = setup().await;
    let err = create(
        &client,
        &CreateOpts {
            name: Some("no_vip".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::MissingField { .. }));
}

#[tokio::test]
async fn test_get_load_balancer_parses_zoneless_timestamps() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loadbalancer": db_lb("PENDING_CREATE")})))
        .mount(&server)
        .await;

    let lb = get(&client, LB_ID).await.unwrap();
    assert_eq!(
        lb.created_at,
        Some(Utc.with_ymd_and_hms(2019, 6, 30, 4, 15, 37).unwrap())
    );
    assert_eq!(
        lb.updated_at,
        Some(Utc.with_ymd_and_hms(2019, 6, 30, 5, 18, 49).unwrap())
    );
    assert_eq!(lb.flavor_id.as_deref(), Some("bba40eb2-ee8c-11e9-81b4-2a2ae2dbcce4"));
}

#[tokio::test]
async fn test_update_load_balancer() {
    let (server, client) = setup().await;

    let mut updated = db_lb("PENDING_CREATE");
    updated["name"] = json!("NewLoadbalancerName");
    updated["tags"] = json!(["test"]);

    Mock::given(method("PUT"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "loadbalancer": {"name": "NewLoadbalancerName", "tags": ["test"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loadbalancer": updated})))
        .mount(&server)
        .await;

    let opts = UpdateOpts {
        name: Some("NewLoadbalancerName".to_string()),
        tags: Some(vec!["test".to_string()]),
        ..Default::default()
    };
    let lb = update(&client, LB_ID, &opts).await.unwrap();
    assert_eq!(lb.name, "NewLoadbalancerName");
    assert_eq!(lb.tags, vec!["test"]);
}

#[tokio::test]
async fn test_delete_load_balancer_cascade() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .and(query_param("cascade", "true"))
        .respond_with(ResponseTemplate::new(204).insert_header("X-OpenStack-Request-Id", "req-del"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = delete(&client, LB_ID, &DeleteOpts { cascade: true })
        .await
        .unwrap();
    assert_eq!(outcome.status, 204);
    assert_eq!(outcome.request_id.as_deref(), Some("req-del"));
}

#[tokio::test]
async fn test_get_statuses_tree() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": {
                "loadbalancer": {
                    "id": LB_ID,
                    "name": "db_lb",
                    "provisioning_status": "PENDING_UPDATE",
                    "operating_status": "ACTIVE",
                    "tags": ["test", "stage"],
                    "listeners": [{
                        "id": "db902c0c-d5ff-4753-b465-668ad9656918",
                        "name": "db",
                        "provisioning_status": "ACTIVE",
                        "pools": [{
                            "id": "fad389a3-9a4a-4762-a365-8c7038508b5d",
                            "name": "db",
                            "provisioning_status": "ACTIVE",
                            "healthmonitor": {
                                "id": "67306cda-815d-4354-9fe4-59e09da9c3c5",
                                "type": "PING",
                                "provisioning_status": "ACTIVE"
                            },
                            "members": [{
                                "id": "2a280670-c202-4b0b-a562-34077415aabf",
                                "name": "db",
                                "address": "10.0.2.11",
                                "protocol_port": 80,
                                "provisioning_status": "ACTIVE"
                            }]
                        }]
                    }]
                }
            }
        })))
        .mount(&server)
        .await;

    let tree = get_statuses(&client, LB_ID).await.unwrap();
    let lb = tree.load_balancer.unwrap();
    assert_eq!(lb.provisioning_status, "PENDING_UPDATE");

    let pool = &lb.listeners[0].pools[0];
    assert_eq!(
        pool.monitor,
        Some(Monitor {
            id: "67306cda-815d-4354-9fe4-59e09da9c3c5".to_string(),
            monitor_type: "PING".to_string(),
            provisioning_status: "ACTIVE".to_string(),
            ..Default::default()
        })
    );
    assert_eq!(pool.members[0].address, "10.0.2.11");
    assert_eq!(pool.members[0].protocol_port, 80);
}

#[tokio::test]
async fn test_get_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}/stats")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": {
                "active_connections": 0,
                "bytes_in": 9532,
                "bytes_out": 22033,
                "request_errors": 46,
                "total_connections": 112
            }
        })))
        .mount(&server)
        .await;

    let stats = get_stats(&client, LB_ID).await.unwrap();
    assert_eq!(
        stats,
        Stats {
            active_connections: 0,
            bytes_in: 9532,
            bytes_out: 22033,
            request_errors: 46,
            total_connections: 112,
        }
    );
}

#[tokio::test]
async fn test_failover() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}/failover")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = failover(&client, LB_ID).await.unwrap();
    assert_eq!(outcome.status, 202);
}

#[tokio::test]
async fn test_wait_for_active() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loadbalancer": db_lb("PENDING_CREATE")})))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loadbalancer": db_lb("ACTIVE")})))
        .expect(1)
        .mount(&server)
        .await;

    wait_for_provisioning_status(
        &client,
        LB_ID,
        &WaitTarget::status("ACTIVE"),
        Duration::from_secs(30),
        &PollPolicy::fixed(Duration::from_millis(10)),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_wait_stops_on_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loadbalancer": db_lb("ERROR")})))
        .expect(1)
        .mount(&server)
        .await;

    let err = wait_for_provisioning_status(
        &client,
        LB_ID,
        &WaitTarget::status("ACTIVE"),
        Duration::from_secs(30),
        &PollPolicy::fixed(Duration::from_millis(10)),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains(LB_ID));
}

#[tokio::test]
async fn test_wait_for_gone() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loadbalancer": db_lb("PENDING_DELETE")})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v2.0/lbaas/loadbalancers/{LB_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "faultcode": "Client",
            "faultstring": format!("Load Balancer {LB_ID} not found.")
        })))
        .mount(&server)
        .await;

    wait_for_provisioning_status(
        &client,
        LB_ID,
        &WaitTarget::Gone,
        Duration::from_secs(30),
        &PollPolicy::fixed(Duration::from_millis(10)),
    )
    .await
    .unwrap();
}
