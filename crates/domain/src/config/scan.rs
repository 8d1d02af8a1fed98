use super::errors::ConfigError;
use super::filters::FilterConfig;
use super::source::SourceConfig;
use crate::dns_record::RecordType;
use crate::range_format::{parse_range, RangeFormat};
use crate::template::HostnameTemplate;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Sweep settings as written in the `[scan]` table or given as flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanOptions {
    /// Hostname containing `FUZZ`
    #[serde(default)]
    pub template: Option<String>,

    /// Range of values to test, `first-last`
    #[serde(default)]
    pub range: Option<String>,

    #[serde(default = "default_range_format")]
    pub range_format: String,

    /// File with one value per line, `-` for stdin
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default = "default_threads")]
    pub threads: usize,

    /// 0 disables rate limiting
    #[serde(default)]
    pub requests_per_second: f64,

    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    #[serde(default)]
    pub skip: u64,

    /// 0 means unlimited
    #[serde(default)]
    pub limit: u64,

    #[serde(default = "default_request_types")]
    pub request_types: Vec<String>,

    /// `ip` or `ip:port`
    #[serde(default = "default_nameserver")]
    pub nameserver: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Prefix for the `.json` checkpoint and `.log` output copy
    #[serde(default)]
    pub logfile: Option<String>,

    /// Directory for automatically named log files
    #[serde(default)]
    pub logdir: Option<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            template: None,
            range: None,
            range_format: default_range_format(),
            file: None,
            threads: default_threads(),
            requests_per_second: 0.0,
            buffer_size: default_buffer_size(),
            skip: 0,
            limit: 0,
            request_types: default_request_types(),
            nameserver: default_nameserver(),
            timeout_ms: default_timeout_ms(),
            logfile: None,
            logdir: None,
        }
    }
}

fn default_range_format() -> String {
    "%d".to_string()
}

fn default_threads() -> usize {
    2
}

fn default_buffer_size() -> usize {
    100_000
}

fn default_request_types() -> Vec<String> {
    vec!["A".to_string(), "AAAA".to_string()]
}

fn default_nameserver() -> String {
    "8.8.8.8".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

/// Validated sweep configuration. Built once, read by every stage.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub template: HostnameTemplate,
    pub source: SourceConfig,
    pub record_types: Vec<RecordType>,
    pub threads: usize,
    pub requests_per_second: f64,
    pub buffer_size: usize,
    pub skip: u64,
    pub limit: u64,
    pub nameserver: SocketAddr,
    pub timeout: Duration,
    pub filters: FilterConfig,
    pub log_prefix: Option<PathBuf>,
}

impl ScanOptions {
    /// Validates against the current local time, which names files
    /// created under `logdir`.
    pub fn validate(&self, filters: FilterConfig) -> Result<ScanConfig, ConfigError> {
        self.validate_at(filters, Local::now())
    }

    pub fn validate_at(
        &self,
        filters: FilterConfig,
        now: DateTime<Local>,
    ) -> Result<ScanConfig, ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads(self.threads));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_ms));
        }

        if !self.requests_per_second.is_finite() || self.requests_per_second < 0.0 {
            return Err(ConfigError::InvalidRequestsPerSecond(
                self.requests_per_second.to_string(),
            ));
        }

        let template = match &self.template {
            Some(t) => HostnameTemplate::parse(t)?,
            None => return Err(ConfigError::MissingTemplate),
        };

        let source = self.parse_source()?;
        let record_types = parse_record_types(&self.request_types)?;
        let nameserver = parse_nameserver(&self.nameserver)?;
        let log_prefix = self.log_prefix(&template, now);

        Ok(ScanConfig {
            template,
            source,
            record_types,
            threads: self.threads,
            requests_per_second: self.requests_per_second,
            buffer_size: self.buffer_size.max(1),
            skip: self.skip,
            limit: self.limit,
            nameserver,
            timeout: Duration::from_millis(self.timeout_ms),
            filters,
            log_prefix,
        })
    }

    fn parse_source(&self) -> Result<SourceConfig, ConfigError> {
        let range = self.range.as_deref().filter(|r| !r.is_empty());
        let file = self.file.as_deref().filter(|f| !f.is_empty());

        match (range, file) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingSources),
            (None, None) => Err(ConfigError::MissingSource),
            (Some(range), None) => {
                let (first, last) = parse_range(range)?;
                let format = RangeFormat::parse(&self.range_format)?;
                Ok(SourceConfig::Range {
                    first,
                    last,
                    format,
                })
            }
            (None, Some("-")) => Ok(SourceConfig::Stdin),
            (None, Some(path)) => Ok(SourceConfig::File(PathBuf::from(path))),
        }
    }

    /// An explicit `logfile` wins over `logdir`.
    fn log_prefix(&self, template: &HostnameTemplate, now: DateTime<Local>) -> Option<PathBuf> {
        if let Some(prefix) = self.logfile.as_deref().filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(prefix));
        }

        let dir = self.logdir.as_deref().filter(|d| !d.is_empty())?;
        let name = format!(
            "ferrous-sweep_{}_{}",
            template.as_str(),
            now.format("%Y%m%d_%H%M%S")
        );
        Some(Path::new(dir).join(name))
    }
}

fn parse_record_types(types: &[String]) -> Result<Vec<RecordType>, ConfigError> {
    let mut parsed = Vec::with_capacity(types.len());
    for t in types {
        let record_type: RecordType = t
            .parse()
            .map_err(|_| ConfigError::InvalidRecordType(t.clone()))?;
        parsed.push(record_type);
    }

    if parsed.is_empty() {
        return Err(ConfigError::NoRecordTypes);
    }

    Ok(parsed)
}

/// Accepts `ip:port`, `[v6]:port` or a bare address (port 53).
pub fn parse_nameserver(server: &str) -> Result<SocketAddr, ConfigError> {
    let server = server.trim();

    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }

    server
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| ConfigError::InvalidNameserver(server.to_string()))
}
