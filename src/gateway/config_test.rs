use super::*;

#[test]
fn default_points_at_local_backend() {
    let cfg = GatewayConfig::default();
    assert_eq!(cfg.base_url().as_str(), DEFAULT_BASE_URL);
    assert_eq!(cfg.timeout(), Duration::from_millis(5000));
}

#[test]
fn url_for_joins_without_double_slash() {
    let cfg = GatewayConfig::new("http://ids.local:9000/api/", Duration::from_secs(1)).unwrap();
    assert_eq!(cfg.url_for("/alerts?limit=5"), "http://ids.local:9000/api/alerts?limit=5");

    let root = GatewayConfig::new("https://ids.local", Duration::from_secs(1)).unwrap();
    assert_eq!(root.url_for("/status"), "https://ids.local/status");
}

#[test]
fn rejects_relative_address() {
    let err = GatewayConfig::new("localhost:8080/api", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));

    let err = GatewayConfig::new("api/v1", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
}

#[test]
fn rejects_non_http_scheme() {
    let err = GatewayConfig::new("ftp://ids.local/api", Duration::from_secs(1)).unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn rejects_query_and_fragment() {
    assert!(GatewayConfig::new("http://ids.local/api?x=1", Duration::from_secs(1)).is_err());
    assert!(GatewayConfig::new("http://ids.local/api#top", Duration::from_secs(1)).is_err());
}

#[test]
fn rejects_zero_timeout() {
    let err = GatewayConfig::new(DEFAULT_BASE_URL, Duration::ZERO).unwrap_err();
    assert!(err.to_string().contains("timeout"));
}
