use super::errors::ConfigError;
use super::filters::FilterOptions;
use super::logging::LoggingConfig;
use super::scan::{ScanConfig, ScanOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration, one table per concern.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanOptions,

    #[serde(default)]
    pub filters: FilterOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub template: Option<String>,
    pub range: Option<String>,
    pub range_format: Option<String>,
    pub file: Option<String>,
    pub threads: Option<usize>,
    pub requests_per_second: Option<f64>,
    pub buffer_size: Option<usize>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub request_types: Option<Vec<String>>,
    pub nameserver: Option<String>,
    pub timeout_ms: Option<u64>,
    pub logfile: Option<String>,
    pub logdir: Option<String>,
    pub show_not_found: Option<bool>,
    pub hide_empty: Option<bool>,
    pub hide_delegations: Option<bool>,
    pub hide_networks: Vec<String>,
    pub show_networks: Vec<String>,
    pub hide_cnames: Vec<String>,
    pub hide_ptrs: Vec<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Reads the optional TOML file, then applies the overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, o: CliOverrides) {
        let scan = &mut self.scan;
        if o.template.is_some() {
            scan.template = o.template;
        }
        if o.range.is_some() {
            scan.range = o.range;
        }
        if let Some(v) = o.range_format {
            scan.range_format = v;
        }
        if o.file.is_some() {
            scan.file = o.file;
        }
        if let Some(v) = o.threads {
            scan.threads = v;
        }
        if let Some(v) = o.requests_per_second {
            scan.requests_per_second = v;
        }
        if let Some(v) = o.buffer_size {
            scan.buffer_size = v;
        }
        if let Some(v) = o.skip {
            scan.skip = v;
        }
        if let Some(v) = o.limit {
            scan.limit = v;
        }
        if let Some(v) = o.request_types {
            scan.request_types = v;
        }
        if let Some(v) = o.nameserver {
            scan.nameserver = v;
        }
        if let Some(v) = o.timeout_ms {
            scan.timeout_ms = v;
        }
        if o.logfile.is_some() {
            scan.logfile = o.logfile;
        }
        if o.logdir.is_some() {
            scan.logdir = o.logdir;
        }

        let filters = &mut self.filters;
        if let Some(v) = o.show_not_found {
            filters.show_not_found = v;
        }
        if let Some(v) = o.hide_empty {
            filters.hide_empty = v;
        }
        if let Some(v) = o.hide_delegations {
            filters.hide_delegations = v;
        }
        if !o.hide_networks.is_empty() {
            filters.hide_networks = o.hide_networks;
        }
        if !o.show_networks.is_empty() {
            filters.show_networks = o.show_networks;
        }
        if !o.hide_cnames.is_empty() {
            filters.hide_cnames = o.hide_cnames;
        }
        if !o.hide_ptrs.is_empty() {
            filters.hide_ptrs = o.hide_ptrs;
        }

        if let Some(level) = o.log_level {
            self.logging.level = level;
        }
    }

    /// Parses everything once, before the pipeline starts.
    pub fn validate(&self) -> Result<ScanConfig, ConfigError> {
        let filters = self.filters.validate()?;
        self.scan.validate(filters)
    }
}
