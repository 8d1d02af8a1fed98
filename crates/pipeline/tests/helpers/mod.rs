#![allow(dead_code)]

#[path = "../../../application/tests/helpers/mock_exchanger.rs"]
pub mod mock_exchanger;

pub mod capture_output;

pub use capture_output::CaptureOutput;
pub use memory_store::MemoryStore;
pub use mock_exchanger::MockExchanger;

use ferrous_sweep_domain::{
    FilterConfig, HostnameTemplate, RangeFormat, RecordType, ScanConfig, SourceConfig,
};
use std::time::Duration;

/// Single-worker range sweep over `host-FUZZ.example.org` querying A only.
pub fn range_config(first: u64, last: u64) -> ScanConfig {
    ScanConfig {
        template: HostnameTemplate::parse("host-FUZZ.example.org").unwrap(),
        source: SourceConfig::Range {
            first,
            last,
            format: RangeFormat::default(),
        },
        record_types: vec![RecordType::A],
        threads: 1,
        requests_per_second: 0.0,
        buffer_size: 16,
        skip: 0,
        limit: 0,
        nameserver: "127.0.0.1:53".parse().unwrap(),
        timeout: Duration::from_millis(100),
        filters: FilterConfig::default(),
        log_prefix: None,
    }
}
