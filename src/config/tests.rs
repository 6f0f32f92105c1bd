//! Tests for the config module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::{BackoffType, Interface};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

const CLOUDS_YAML: &str = r#"
clouds:
  devstack:
    auth:
      auth_url: https://keystone.example.com/v3
      username: demo
      password: secret
      project_name: demo
      user_domain_name: Default
      project_domain_name: Default
    region_name: RegionOne
    interface: internal
    http:
      timeout_seconds: 15
      rate_limit:
        requests_per_second: 5
    poll:
      interval_ms: 500
      backoff: exponential
      max_interval_ms: 8000
  swift-only:
    auth:
      token: gAAAAABe
    endpoint_override:
      object-store: https://swift.example.com/v1/AUTH_test
"#;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_password_cloud() {
    let file = load_clouds_from_str(CLOUDS_YAML).unwrap();
    let cloud = file.cloud("devstack").unwrap();

    assert_eq!(cloud.region_name.as_deref(), Some("RegionOne"));
    assert_eq!(cloud.interface, Interface::Internal);

    match cloud.auth_config().unwrap() {
        AuthConfig::Password(auth) => {
            assert_eq!(auth.auth_url, "https://keystone.example.com/v3");
            assert_eq!(auth.username, "demo");
            assert_eq!(auth.project_name.as_deref(), Some("demo"));
        }
        other => panic!("unexpected auth: {other:?}"),
    }
}

#[test]
fn test_http_and_poll_sections() {
    let cloud = load_clouds_from_str(CLOUDS_YAML)
        .unwrap()
        .cloud("devstack")
        .unwrap();

    let http = cloud.http_client_config();
    assert_eq!(http.timeout, Duration::from_secs(15));
    assert_eq!(http.rate_limit.map(|r| r.requests_per_second), Some(5));

    let policy = cloud.poll_policy();
    assert_eq!(policy.interval, Duration::from_millis(500));
    assert_eq!(policy.backoff, BackoffType::Exponential);
    assert_eq!(policy.delay(10), Duration::from_secs(8));
}

#[test]
fn test_defaults_when_sections_missing() {
    let cloud = load_clouds_from_str(CLOUDS_YAML)
        .unwrap()
        .cloud("swift-only")
        .unwrap();

    assert_eq!(cloud.interface, Interface::Public);
    assert_eq!(cloud.http_client_config().timeout, Duration::from_secs(60));
    assert!(cloud.http_client_config().rate_limit.is_none());
    assert_eq!(cloud.poll_policy(), crate::waiter::PollPolicy::default());
    assert!(matches!(
        cloud.auth_config().unwrap(),
        AuthConfig::Token { ref token } if token == "gAAAAABe"
    ));
}

#[test]
fn test_unknown_cloud_lists_known_ones() {
    let err = load_clouds_from_str(CLOUDS_YAML)
        .unwrap()
        .cloud("prod")
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("devstack, swift-only"));
}

#[test]
fn test_invalid_yaml() {
    assert!(matches!(
        load_clouds_from_str("clouds: [not, a, map]"),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_missing_password_is_reported() {
    let mut cloud = CloudConfig::default();
    cloud.auth.auth_url = Some("https://keystone.example.com/v3".to_string());
    cloud.auth.username = Some("demo".to_string());

    let err = cloud.auth_config().unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field } if field == "auth.password"));
}

// ============================================================================
// Environment Tests
// ============================================================================

#[test]
fn test_env_overrides_file_values() {
    let mut cloud = load_clouds_from_str(CLOUDS_YAML)
        .unwrap()
        .cloud("devstack")
        .unwrap();

    cloud
        .apply_env(env(&[
            ("OS_PASSWORD", "from-env"),
            ("OS_REGION_NAME", "RegionTwo"),
            ("OS_INTERFACE", "publicURL"),
            ("OS_PROJECT_ID", ""),
        ]))
        .unwrap();

    assert_eq!(cloud.auth.password.as_deref(), Some("from-env"));
    assert_eq!(cloud.region_name.as_deref(), Some("RegionTwo"));
    assert_eq!(cloud.interface, Interface::Public);
    // empty variables are ignored
    assert_eq!(cloud.auth.project_id, None);
}

#[test]
fn test_env_only_cloud() {
    let mut cloud = CloudConfig::default();
    cloud
        .apply_env(env(&[
            ("OS_AUTH_URL", "https://keystone.example.com/v3"),
            ("OS_USERNAME", "admin"),
            ("OS_PASSWORD", "pw"),
        ]))
        .unwrap();
    assert!(matches!(cloud.auth_config().unwrap(), AuthConfig::Password(_)));
}

#[test]
fn test_bad_interface_in_env() {
    let mut cloud = CloudConfig::default();
    assert!(cloud.apply_env(env(&[("OS_INTERFACE", "private")])).is_err());
}

#[test]
fn test_endpoint_opts() {
    let cloud = load_clouds_from_str(CLOUDS_YAML)
        .unwrap()
        .cloud("devstack")
        .unwrap();
    let opts = cloud.endpoint_opts("load-balancer");
    assert_eq!(opts.service_type, "load-balancer");
    assert_eq!(opts.interface, Interface::Internal);
    assert_eq!(opts.region.as_deref(), Some("RegionOne"));
}

// ============================================================================
// File Discovery Tests
// ============================================================================

#[test]
fn test_search_order() {
    let paths = search_paths(Some(Path::new("/etc/custom.yaml")), Some(Path::new("/home/demo")));
    assert_eq!(
        paths,
        vec![
            Path::new("/etc/custom.yaml").to_path_buf(),
            Path::new("clouds.yaml").to_path_buf(),
            Path::new("/home/demo/.config/openstack/clouds.yaml").to_path_buf(),
        ]
    );
}

#[test]
fn test_load_from_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CLOUDS_YAML.as_bytes()).unwrap();

    assert_eq!(find_clouds_file(Some(file.path())).unwrap(), Some(file.path().to_path_buf()));
    let clouds = load_clouds_file(file.path()).unwrap();
    assert_eq!(clouds.clouds.len(), 2);
}

#[test]
fn test_missing_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("clouds.yaml");
    assert!(matches!(
        find_clouds_file(Some(&missing)),
        Err(Error::FileNotFound { .. })
    ));
}

#[tokio::test]
async fn test_service_client_uses_override() {
    let cloud = load_clouds_from_str(CLOUDS_YAML)
        .unwrap()
        .cloud("swift-only")
        .unwrap();
    let transport = cloud.connect().unwrap();
    let client = cloud.service_client(&transport, "object-store").await.unwrap();
    assert_eq!(
        client.endpoint().as_str(),
        "https://swift.example.com/v1/AUTH_test/"
    );
}
