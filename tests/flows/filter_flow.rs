/// Filter Flow Tests
///
/// Hide filters applied to real responses, and how they reach the
/// checkpoint and the printed report.

#[path = "../common/mod.rs"]
mod common;
use common::dns_server_mock::{RCODE_SERVFAIL, TYPE_A, TYPE_CNAME};
use common::{run_sweep, scan_config, MockAnswer, MockDnsServer, MockRecord, MockZone};

// ============================================================================
// Request tier
// ============================================================================

#[tokio::test]
async fn test_not_found_result_is_hidden() {
    // Arrange: empty zone, every name is NXDOMAIN
    let server = MockDnsServer::start(MockZone::new()).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "gone-FUZZ.example.org"
        range = "1-1"
        request_types = ["A"]
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.checkpoint["hidden_results"], 1);
    assert_eq!(run.checkpoint["shown_results"], 0);
    assert_eq!(run.checkpoint["results"], serde_json::json!([]));
    assert!(run.output.lines_starting_with("gone-").is_empty());

    server.shutdown();
}

#[tokio::test]
async fn test_show_not_found_keeps_nxdomain_visible() {
    // Arrange
    let server = MockDnsServer::start(MockZone::new()).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "gone-FUZZ.example.org"
        range = "1-1"
        request_types = ["A"]

        [filters]
        show_not_found = true
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.checkpoint["shown_results"], 1);
    assert_eq!(run.checkpoint["results"][0]["requests"][0]["status"], "NXDOMAIN");
    assert_eq!(run.output.lines_starting_with("gone-1.").len(), 1);
    assert_eq!(run.summary.report.errors, 0);

    server.shutdown();
}

#[tokio::test]
async fn test_server_failure_counts_as_error() {
    // Arrange
    let zone = MockZone::new().with(
        "broken-1.example.org.",
        TYPE_A,
        MockAnswer::rcode(RCODE_SERVFAIL),
    );
    let server = MockDnsServer::start(zone).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "broken-FUZZ.example.org"
        range = "1-1"
        request_types = ["A"]
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.summary.report.errors, 1);
    assert_eq!(run.checkpoint["results"][0]["requests"][0]["status"], "SERVFAIL");

    server.shutdown();
}

// ============================================================================
// Response tier
// ============================================================================

#[tokio::test]
async fn test_hidden_network_hides_only_the_response() {
    // Arrange
    let zone = MockZone::new().with(
        "web-1.example.org.",
        TYPE_A,
        MockAnswer::records(vec![MockRecord::a("web-1.example.org.", "192.0.2.10")]),
    );
    let server = MockDnsServer::start(zone).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "web-FUZZ.example.org"
        range = "1-1"
        request_types = ["A"]

        [filters]
        hide_networks = ["192.0.2.0/24"]
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert: the request stays, its only response does not
    assert_eq!(run.checkpoint["shown_results"], 1);
    assert_eq!(run.checkpoint["hidden_results"], 0);
    let result = &run.checkpoint["results"][0];
    assert!(result.get("potential_suffix").is_none());
    assert_eq!(result["requests"][0]["status"], "NOERROR");
    assert_eq!(result["requests"][0]["responses"], serde_json::json!([]));
    assert!(run.output.lines_starting_with("web-1.").is_empty());

    server.shutdown();
}

#[tokio::test]
async fn test_hidden_cname_pattern() {
    // Arrange
    let zone = MockZone::new()
        .with(
            "cdn-1.example.org.",
            TYPE_CNAME,
            MockAnswer::records(vec![MockRecord::cname(
                "cdn-1.example.org.",
                "edge.cdn.example.net.",
            )]),
        )
        .with(
            "cdn-2.example.org.",
            TYPE_CNAME,
            MockAnswer::records(vec![MockRecord::cname(
                "cdn-2.example.org.",
                "origin.example.org.",
            )]),
        );
    let server = MockDnsServer::start(zone).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "cdn-FUZZ.example.org"
        range = "1-2"
        request_types = ["CNAME"]

        [filters]
        hide_cnames = ['\.cdn\.example\.net$']
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.output.lines_starting_with("cdn-1.").len(), 0);
    assert_eq!(
        run.output.lines_starting_with("cdn-2."),
        vec![format!("{:<31} CNAME origin.example.org", "cdn-2.example.org.")]
    );

    server.shutdown();
}

// ============================================================================
// Result tier
// ============================================================================

#[tokio::test]
async fn test_hide_empty_hides_suffix_only_names() {
    // Arrange: the name exists but has no A record
    let zone = MockZone::new().with("sub-1.example.org.", TYPE_A, MockAnswer::records(vec![]));
    let server = MockDnsServer::start(zone).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "sub-FUZZ.example.org"
        range = "1-1"
        request_types = ["A"]

        [filters]
        hide_empty = true
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.checkpoint["hidden_results"], 1);
    assert_eq!(run.summary.report.empty, 1);

    server.shutdown();
}
