// End-to-end scan tests against a local mock CDN edge

use std::time::Duration;

use hw_pragma_scan::config::ScanConfig;
use hw_pragma_scan::constants::{EXIT_FIELD_ERRORS, EXIT_SCAN_FAILED};
use hw_pragma_scan::pragma::Field;
use hw_pragma_scan::report::{exit_code, write_outcome, ReportFormat};
use hw_pragma_scan::{FieldErrorKind, ScanError, Scanner};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scanner() -> Scanner {
    Scanner::new(&ScanConfig::default()).expect("failed to create scanner")
}

#[tokio::test]
async fn test_scan_populates_record_from_response_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/video/seg-1.ts"))
        .and(header("pragma", "X-HW-Cache-All"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-HW-Cache-TTL", "3600")
                .insert_header("X-HW-Cache-Key", "abc123")
                .insert_header("Cache-Control", "max-age=0"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/video/seg-1.ts", mock_server.uri());
    let outcome = scanner().scan(&url).await.expect("scan failed");

    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.target, url);
    let record = &outcome.diagnostics;
    assert_eq!(record.cache_ttl_seconds, 3600);
    assert_eq!(record.cache_key, vec!["abc123"]);
    assert_eq!(record.cache_control, vec!["max-age=0"]);

    // Present headers never produce errors; absent core headers do
    assert!(outcome
        .field_errors
        .iter()
        .all(|e| e.kind == FieldErrorKind::MissingRequiredHeader));
    assert!(outcome.field_errors.iter().all(|e| !matches!(
        e.field,
        Field::CacheTtlSeconds | Field::CacheKey | Field::CacheControl
    )));
    assert_eq!(outcome.field_errors.len(), 7);
}

#[tokio::test]
async fn test_scan_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "edge-probe/9"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-HW-Cache-TTL", "60"))
        .mount(&mock_server)
        .await;

    let config = ScanConfig {
        user_agent: "edge-probe/9".to_string(),
        ..Default::default()
    };
    let scanner = Scanner::new(&config).unwrap();
    let outcome = scanner.scan(&mock_server.uri()).await.unwrap();
    assert_eq!(outcome.diagnostics.cache_ttl_seconds, 60);
}

#[tokio::test]
async fn test_malformed_integer_header_does_not_fail_scan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-HW-Cache-TTL", "abc")
                .insert_header("X-HW-Cache-CRC", "42"),
        )
        .mount(&mock_server)
        .await;

    let outcome = scanner().scan(&mock_server.uri()).await.unwrap();
    assert_eq!(outcome.diagnostics.cache_ttl_seconds, 0);
    assert_eq!(outcome.diagnostics.cache_crc, 42);
    let conversions: Vec<_> = outcome
        .field_errors
        .iter()
        .filter(|e| e.kind == FieldErrorKind::ConversionFailed)
        .collect();
    assert_eq!(conversions.len(), 1);
    assert_eq!(conversions[0].field, Field::CacheTtlSeconds);
}

#[tokio::test]
async fn test_repeated_headers_keep_all_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("X-HW", "1576521693.dop001.se1.t")
                .append_header("X-HW", "1576521693.cds001.se1.c"),
        )
        .mount(&mock_server)
        .await;

    let outcome = scanner().scan(&mock_server.uri()).await.unwrap();
    assert_eq!(
        outcome.diagnostics.cache_tag,
        vec!["1576521693.dop001.se1.t", "1576521693.cds001.se1.c"]
    );
}

#[tokio::test]
async fn test_error_status_is_still_a_completed_scan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).insert_header("X-HW-Cache-Behavior", "bypass"))
        .mount(&mock_server)
        .await;

    let outcome = scanner().scan(&mock_server.uri()).await.unwrap();
    assert_eq!(outcome.status, 503);
    assert_eq!(outcome.diagnostics.cache_behavior, vec!["bypass"]);
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", mock_server.uri())),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-HW-Cache-TTL", "120"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/old", mock_server.uri());
    let outcome = scanner().scan(&url).await.unwrap();
    assert!(outcome.final_url.ends_with("/new"));
    assert_eq!(outcome.diagnostics.cache_ttl_seconds, 120);
}

#[tokio::test]
async fn test_slow_response_hits_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let scanner = scanner().with_timeout(Some(Duration::from_millis(200)));
    let err = scanner.scan(&mock_server.uri()).await.unwrap_err();
    assert!(matches!(err, ScanError::Timeout { .. }), "{err:?}");
}

#[tokio::test]
async fn test_scan_can_be_cancelled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let cancel = tokio::time::sleep(Duration::from_millis(100));
    let err = scanner()
        .scan_until(&mock_server.uri(), cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Cancelled { .. }), "{err:?}");
}

#[tokio::test]
async fn test_unresolvable_host_is_transport_error() {
    let err = scanner()
        .scan("http://edge.hwscan-test.invalid/file.ts")
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn test_strict_exit_code_follows_field_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-HW-Cache-TTL", "60"))
        .mount(&mock_server)
        .await;

    let result = scanner().scan(&mock_server.uri()).await;
    assert_eq!(exit_code(&result, false), 0);
    assert_eq!(exit_code(&result, true), EXIT_FIELD_ERRORS);

    let outcome = result.expect("scan failed");
    let mut out = Vec::new();
    write_outcome(&outcome, ReportFormat::Text, chrono::Utc::now(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("complete\n"));
    assert!(text.contains("Field errors (8):"));
}

#[tokio::test]
async fn test_failed_scan_exits_without_report() {
    let result = scanner().scan("http://127.0.0.1:9/file.ts").await;
    assert!(matches!(result, Err(ScanError::Transport { .. })), "{result:?}");
    assert_eq!(exit_code(&result, false), EXIT_SCAN_FAILED);
}
