use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ari_probe::{
    AriResolver, DecodeError, Error, ErrorKind, RenewalChecker, ReqwestFetcher, ResolverConfig,
};

const AKI_FIXED_PEM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/aki-fixed.pem");
const LEAF_PEM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/leaf.pem");
const NO_AKI_PEM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/no-aki.pem");

async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newNonce": format!("{}/acme/new-nonce", server.uri()),
            "renewalInfo": format!("{}/renewalInfo", server.uri()),
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn checker(server: &MockServer) -> RenewalChecker<ReqwestFetcher> {
    let config = ResolverConfig::new(format!("{}/directory", server.uri()))
        .with_timeout(Some(Duration::from_secs(5)));
    RenewalChecker::new(AriResolver::new(ReqwestFetcher::new().unwrap(), config))
}

#[tokio::test]
async fn test_check_prints_renewal_window() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path("/renewalInfo/AQID.BAU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestedWindow": {
                "start": "2025-01-01T00:00:00Z",
                "end": "2025-01-02T00:00:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let count = checker(&server)
        .check_all(&[AKI_FIXED_PEM], &mut out)
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n    \"suggestedWindow\": {\n        \"start\": \"2025-01-01T00:00:00Z\",\n        \"end\": \"2025-01-02T00:00:00Z\"\n    }\n}\n"
    );
}

#[tokio::test]
async fn test_check_discovers_once_for_many_certificates() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path("/renewalInfo/AQID.BAU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestedWindow": {"start": "a", "end": "b"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/renewalInfo/mB1xKLvhYxDQzitD83dE5pHvm3o.AIdlQyE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "explanationURL": "https://example.test/why",
            "suggestedWindow": {"start": "c", "end": "d"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let count = checker(&server)
        .check_all(&[AKI_FIXED_PEM, LEAF_PEM], &mut out)
        .await
        .unwrap();

    assert_eq!(count, 2);
    let out = String::from_utf8(out).unwrap();
    let first = out.find("\"start\": \"a\"").unwrap();
    let second = out.find("\"start\": \"c\"").unwrap();
    assert!(first < second);
    assert!(out.contains("\"explanationURL\": \"https://example.test/why\""));
}

#[tokio::test]
async fn test_error_status_body_is_still_parsed() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path("/renewalInfo/AQID.BAU"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "suggestedWindow": {"start": "a", "end": "b"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    checker(&server)
        .check_all(&[AKI_FIXED_PEM], &mut out)
        .await
        .unwrap();
    assert!(String::from_utf8(out).unwrap().contains("\"end\": \"b\""));
}

#[tokio::test]
async fn test_missing_renewal_info_field_stops_before_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newNonce": "https://example.test/nonce"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/renewalInfo/AQID.BAU"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = checker(&server)
        .check_all(&[AKI_FIXED_PEM], &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_failure_stops_remaining_certificates() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path("/renewalInfo/AQID.BAU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestedWindow": {"start": "a", "end": "b"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = checker(&server)
        .check_all(&[AKI_FIXED_PEM, NO_AKI_PEM, LEAF_PEM], &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingExtension);
    // The first result was already written
    assert!(String::from_utf8(out).unwrap().contains("\"start\": \"a\""));
}

#[tokio::test]
async fn test_unreachable_directory_is_transport_error() {
    let resolver = AriResolver::new(
        ReqwestFetcher::new().unwrap(),
        ResolverConfig::new("http://127.0.0.1:1/directory"),
    );

    let err = resolver.discover_endpoint().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("http://127.0.0.1:1/directory"));
}

#[tokio::test]
async fn test_empty_path_list_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let paths: [&str; 0] = [];
    let mut out = Vec::new();
    let err = checker(&server).check_all(&paths, &mut out).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
