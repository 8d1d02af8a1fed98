use crate::dns_record::RecordType;
use std::net::IpAddr;

/// One answer record of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub record_type: RecordType,
    /// Address for A/AAAA, target name (without trailing dot) otherwise.
    pub data: String,
    pub ttl: u32,
    pub hide: bool,
}

impl LookupResponse {
    pub fn new(record_type: RecordType, data: impl Into<String>, ttl: u32) -> Self {
        Self {
            record_type,
            data: data.into(),
            ttl,
            hide: false,
        }
    }

    /// Parsed address of an A/AAAA record.
    pub fn address(&self) -> Option<IpAddr> {
        if !self.record_type.is_address() {
            return None;
        }
        self.data.parse().ok()
    }
}
