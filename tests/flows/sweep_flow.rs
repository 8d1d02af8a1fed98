/// Sweep Flow Tests
///
/// Full sweeps over UDP against the mock server:
/// Source → Skip/Limit → Resolvers → Classification → Checkpoint → Report

#[path = "../common/mod.rs"]
mod common;
use common::dns_server_mock::TYPE_A;
use common::{
    recorded_hostnames, run_sweep, scan_config, MockAnswer, MockDnsServer, MockRecord, MockZone,
};

fn numbered_zone(first: u64, last: u64) -> MockZone {
    (first..=last).fold(MockZone::new(), |zone, i| {
        let name = format!("host-{}.example.org.", i);
        zone.with(
            &name,
            TYPE_A,
            MockAnswer::records(vec![MockRecord::a(&name, &format!("198.51.100.{}", i))]),
        )
    })
}

// ============================================================================
// Range sweeps
// ============================================================================

#[tokio::test]
async fn test_range_sweep_records_every_hostname() {
    // Arrange
    let server = MockDnsServer::start(numbered_zone(1, 5)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "host-FUZZ.example.org."
        range = "1-5"
        threads = 1
        request_types = ["A"]
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert!(!run.summary.cancelled);
    assert_eq!(run.checkpoint["total_requests"], 5);
    assert_eq!(run.checkpoint["sent_requests"], 5);
    assert_eq!(run.checkpoint["cancelled"], false);
    assert_eq!(run.checkpoint["hostname"], "host-FUZZ.example.org");
    assert_eq!(run.checkpoint["range"], "1-5");
    assert_eq!(run.checkpoint["range_format"], "%d");
    assert_eq!(
        recorded_hostnames(&run.checkpoint),
        (1..=5)
            .map(|i| format!("host-{}.example.org.", i))
            .collect::<Vec<_>>()
    );

    let first = &run.checkpoint["results"][0]["requests"][0];
    assert_eq!(first["type"], "A");
    assert_eq!(first["status"], "NOERROR");
    assert_eq!(first["responses"][0]["ttl"], 300);

    server.shutdown();
}

#[tokio::test]
async fn test_skip_and_limit_sweep_middle_of_range() {
    // Arrange
    let server = MockDnsServer::start(numbered_zone(1, 10)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = scan_config(
        r#"
        [scan]
        template = "host-FUZZ.example.org"
        range = "1-10"
        skip = 2
        limit = 2
        threads = 2
        request_types = ["A"]
        "#,
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.summary.report.processed, 2);
    assert_eq!(run.summary.report.total, Some(2));
    assert_eq!(run.checkpoint["total_requests"], 2);
    assert_eq!(
        recorded_hostnames(&run.checkpoint),
        vec!["host-3.example.org.", "host-4.example.org."]
    );

    server.shutdown();
}

#[tokio::test]
async fn test_values_file_sweep() {
    // Arrange
    let zone = MockZone::new().with(
        "mail.example.org.",
        TYPE_A,
        MockAnswer::records(vec![MockRecord::a("mail.example.org.", "192.0.2.25")]),
    );
    let server = MockDnsServer::start(zone).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let values = dir.path().join("values.txt");
    std::fs::write(&values, "www\nmail\nftp\n").unwrap();
    let config = scan_config(
        &format!(
            r#"
            [scan]
            template = "FUZZ.example.org"
            file = "{}"
            request_types = ["A"]
            "#,
            values.display()
        ),
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    assert_eq!(run.checkpoint["total_requests"], 3);
    assert_eq!(run.checkpoint["hidden_results"], 2);
    assert_eq!(recorded_hostnames(&run.checkpoint), vec!["mail.example.org."]);
    assert!(run.checkpoint.get("range_format").is_none());
    assert_eq!(
        run.output.lines_starting_with("mail.example.org."),
        vec![format!("{:<27} A 192.0.2.25", "mail.example.org.")]
    );

    server.shutdown();
}

#[tokio::test]
async fn test_delegation_is_recorded_with_nameservers() {
    // Arrange
    let zone = MockZone::new().with(
        "dev.example.org.",
        TYPE_A,
        MockAnswer::authority(vec![
            MockRecord::ns("dev.example.org.", "ns2.dev.example.org."),
            MockRecord::ns("dev.example.org.", "ns1.dev.example.org."),
        ]),
    );
    let server = MockDnsServer::start(zone).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let values = dir.path().join("values.txt");
    std::fs::write(&values, "dev\n").unwrap();
    let config = scan_config(
        &format!(
            r#"
            [scan]
            template = "FUZZ.example.org"
            file = "{}"
            request_types = ["A"]
            "#,
            values.display()
        ),
        &server,
        dir.path(),
    );

    // Act
    let run = run_sweep(config).await;

    // Assert
    let result = &run.checkpoint["results"][0];
    assert_eq!(result["potential_delegation"], true);
    assert!(result.get("potential_suffix").is_none());
    assert_eq!(
        result["nameservers"],
        serde_json::json!(["ns1.dev.example.org", "ns2.dev.example.org"])
    );
    assert_eq!(run.summary.report.delegations, 1);
    assert_eq!(
        run.output.lines_starting_with("dev.example.org."),
        vec![format!(
            "{:<27} potential delegation, nameservers: ns1.dev.example.org, ns2.dev.example.org",
            "dev.example.org."
        )]
    );

    server.shutdown();
}
