#![allow(dead_code)]

#[path = "../../crates/infrastructure/tests/helpers/dns_server_mock.rs"]
pub mod dns_server_mock;

#[path = "../../crates/pipeline/tests/helpers/capture_output.rs"]
pub mod capture_output;

pub use capture_output::CaptureOutput;
pub use dns_server_mock::{MockAnswer, MockDnsServer, MockRecord, MockZone};

use ferrous_sweep_domain::{CheckpointMetadata, Config, ScanConfig};
use ferrous_sweep_infrastructure::{open_value_source, HickoryExchanger, JsonCheckpointStore};
use ferrous_sweep_pipeline::{Pipeline, RunSummary};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Parses a `[scan]`/`[filters]` TOML snippet pointed at `server`, with the
/// checkpoint prefix inside `dir`.
pub fn scan_config(toml: &str, server: &MockDnsServer, dir: &Path) -> ScanConfig {
    let mut config = Config::from_toml(toml).unwrap();
    config.scan.nameserver = server.addr().to_string();
    config.scan.timeout_ms = 500;
    config.scan.logfile = Some(dir.join("sweep").display().to_string());
    config.validate().unwrap()
}

/// Everything a finished sweep left behind.
pub struct SweepRun {
    pub summary: RunSummary,
    pub checkpoint: serde_json::Value,
    pub output: CaptureOutput,
}

/// Runs the full pipeline the way the binary does, minus the console.
pub async fn run_sweep(config: ScanConfig) -> SweepRun {
    let prefix = config.log_prefix.clone().unwrap();
    let store = JsonCheckpointStore::for_prefix(&prefix);
    let path: PathBuf = store.path().to_path_buf();
    let exchanger = Arc::new(HickoryExchanger::new(config.nameserver, config.timeout));
    let source = open_value_source(&config.source).await.unwrap();
    let output = CaptureOutput::new();
    let metadata = CheckpointMetadata::from_config(&config);

    let summary = Pipeline::new(config, exchanger)
        .with_recorder(Arc::new(store), metadata)
        .run(source, Box::new(output.clone()), CancellationToken::new())
        .await
        .unwrap();

    let checkpoint = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    SweepRun {
        summary,
        checkpoint,
        output,
    }
}

/// Sorted `hostname` fields of the checkpoint results.
pub fn recorded_hostnames(checkpoint: &serde_json::Value) -> Vec<String> {
    let mut names: Vec<String> = checkpoint["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["hostname"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}
