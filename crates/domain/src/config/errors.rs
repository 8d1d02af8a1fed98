use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid number of threads: {0}")]
    InvalidThreads(usize),

    #[error("Invalid timeout: {0}ms")]
    InvalidTimeout(u64),

    #[error("Invalid requests per second: {0}")]
    InvalidRequestsPerSecond(String),

    #[error("Only one source allowed but both range and file specified")]
    ConflictingSources,

    #[error("Neither file nor range specified, nothing to do")]
    MissingSource,

    #[error("Wrong format for range {0:?}, expected: first-last")]
    InvalidRange(String),

    #[error("Invalid range format {format:?}: {reason}")]
    InvalidRangeFormat { format: String, reason: String },

    #[error("Invalid network {network:?}: {reason}")]
    InvalidNetwork { network: String, reason: String },

    #[error("Pattern {pattern:?} failed to compile: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid request type {0:?}")]
    InvalidRecordType(String),

    #[error("No request types configured")]
    NoRecordTypes,

    #[error("No hostname template specified")]
    MissingTemplate,

    #[error("Hostname {0:?} does not contain the string \"FUZZ\"")]
    TemplateWithoutPlaceholder(String),

    #[error("Invalid nameserver address {0:?}")]
    InvalidNameserver(String),
}
