use super::response::LookupResponse;
use crate::dns_record::RecordType;

pub const STATUS_SUCCESS: &str = "NOERROR";
pub const STATUS_NOT_FOUND: &str = "NXDOMAIN";

/// Zone-file text of each message section, kept verbatim for the audit trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSections {
    pub question: Vec<String>,
    pub answer: Vec<String>,
    pub authority: Vec<String>,
    pub additional: Vec<String>,
}

/// One record-type query made for a swept hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub record_type: RecordType,
    pub status: String,
    pub failure: bool,
    pub not_found: bool,
    pub hide: bool,
    /// Transport error, when no response was received at all.
    pub error: Option<String>,
    pub responses: Vec<LookupResponse>,
    /// NS records of the authority section owned by the queried name.
    pub nameservers: Vec<String>,
    /// SOA records of the authority section owned by the queried name.
    pub soa: Vec<String>,
    pub raw: RawSections,
}

impl LookupRequest {
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            status: String::new(),
            failure: false,
            not_found: false,
            hide: false,
            error: None,
            responses: Vec::new(),
            nameservers: Vec::new(),
            soa: Vec::new(),
            raw: RawSections::default(),
        }
    }

    /// Request that got an answer with the given status code.
    pub fn from_status(record_type: RecordType, status: impl Into<String>) -> Self {
        let status = status.into();
        let mut request = Self::new(record_type);
        request.failure = status != STATUS_SUCCESS;
        request.not_found = status == STATUS_NOT_FOUND;
        request.status = status;
        request
    }

    /// Request that never got an answer.
    pub fn failed(record_type: RecordType, error: impl Into<String>) -> Self {
        let mut request = Self::new(record_type);
        request.failure = true;
        request.error = Some(error.into());
        request
    }

    /// No failure and no answer records.
    pub fn is_empty(&self) -> bool {
        !self.failure && self.responses.is_empty()
    }

    pub fn has_authority(&self) -> bool {
        !self.nameservers.is_empty() || !self.soa.is_empty()
    }

    pub fn visible_responses(&self) -> impl Iterator<Item = &LookupResponse> {
        self.responses.iter().filter(|r| !r.hide)
    }
}
