use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_uses_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.timeouts, Timeouts::default());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("SHARE_PLACES_API_URL", "https://places.example.test/"),
        ("SHARE_PLACES_REQUEST_TIMEOUT_SECS", "42"),
        ("SHARE_PLACES_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_url, "https://places.example.test");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.timeouts.request(), Duration::from_secs(42));
}

#[test]
fn from_lookup_rejects_bad_timeout() {
    let err = ClientConfig::from_lookup(lookup_from(&[("SHARE_PLACES_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { key: "SHARE_PLACES_REQUEST_TIMEOUT_SECS", .. }));
    assert_eq!(err.error_code(), "E_CONFIG_NUMBER");
}

#[test]
fn new_rejects_origin_without_scheme() {
    let err = ClientConfig::new("localhost:8080").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOrigin(_)));
    assert!(ClientConfig::new("http://").is_err());
}

#[test]
fn endpoint_joins_without_double_slash() {
    let cfg = ClientConfig::new("http://localhost:8080/").unwrap();
    assert_eq!(cfg.endpoint("/api/users"), "http://localhost:8080/api/users");
    assert_eq!(cfg.endpoint("api/users/login"), "http://localhost:8080/api/users/login");
}

#[test]
fn asset_url_resolves_relative_image_path() {
    let cfg = ClientConfig::new("http://localhost:8080").unwrap();
    assert_eq!(cfg.asset_url("uploads/images/a.png"), "http://localhost:8080/uploads/images/a.png");
}
