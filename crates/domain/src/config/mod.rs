//! Configuration for ferrous-sweep
//!
//! - `root`: main configuration, TOML loading and CLI overrides
//! - `scan`: source, template, concurrency and nameserver settings
//! - `source`: the parsed value source
//! - `filters`: display filter settings
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod errors;
pub mod filters;
pub mod logging;
pub mod root;
pub mod scan;
pub mod source;

pub use errors::ConfigError;
pub use filters::{FilterConfig, FilterOptions};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use scan::{parse_nameserver, ScanConfig, ScanOptions, DEFAULT_DNS_PORT};
pub use source::SourceConfig;
