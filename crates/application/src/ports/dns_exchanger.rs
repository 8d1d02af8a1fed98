use async_trait::async_trait;
use ferrous_sweep_domain::{DomainError, RawSections, RecordType};

/// One resource record as seen on the wire, reduced to what a sweep uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangedRecord {
    /// Owner name, fully qualified.
    pub name: String,
    pub record_type: RecordType,
    /// Address for A/AAAA; target name without the trailing dot otherwise.
    /// For SOA this is the primary nameserver.
    pub data: String,
    pub ttl: u32,
}

impl ExchangedRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        data: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            data: data.into(),
            ttl,
        }
    }
}

/// Parsed reply to a single query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeOutcome {
    /// Response code mnemonic, e.g. `NOERROR` or `NXDOMAIN`.
    pub status: String,
    pub answers: Vec<ExchangedRecord>,
    pub authority: Vec<ExchangedRecord>,
    pub raw: RawSections,
}

impl ExchangeOutcome {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }
}

/// Sends one query of `record_type` for `name` and waits for the reply.
///
/// `Err` means no usable reply arrived (timeout, socket error, garbage).
/// Negative answers such as NXDOMAIN are `Ok`.
#[async_trait]
pub trait DnsExchanger: Send + Sync {
    async fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<ExchangeOutcome, DomainError>;
}
