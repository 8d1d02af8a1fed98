use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout after {timeout_ms}ms waiting for {server}")]
    TransportTimeout { server: String, timeout_ms: u64 },

    #[error("Transport error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Failed to serialize checkpoint: {0}")]
    CheckpointSerialization(String),

    #[error("Failed to write checkpoint {path}: {reason}")]
    CheckpointWrite { path: String, reason: String },

    #[error("Failed to open source {path}: {reason}")]
    SourceOpen { path: String, reason: String },

    #[error("Failed to read source: {0}")]
    SourceRead(String),
}
