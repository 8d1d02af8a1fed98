use super::request::LookupRequest;
use std::sync::OnceLock;

/// Everything learned about one swept value.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub item: String,
    pub hostname: String,
    pub hide: bool,
    /// One entry per configured record type, in configured order.
    pub requests: Vec<LookupRequest>,
    nameservers: OnceLock<Vec<String>>,
}

impl LookupResult {
    pub fn new(item: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            hostname: hostname.into(),
            hide: false,
            requests: Vec::new(),
            nameservers: OnceLock::new(),
        }
    }

    pub fn with_requests(mut self, requests: Vec<LookupRequest>) -> Self {
        self.requests = requests;
        self.nameservers = OnceLock::new();
        self
    }

    /// Every request succeeded without answer records.
    ///
    /// Hide flags are not consulted: emptiness describes the data, not the
    /// display.
    pub fn is_empty(&self) -> bool {
        self.requests.iter().all(LookupRequest::is_empty)
    }

    /// Empty, but some request saw NS or SOA authority records for the
    /// queried name itself.
    pub fn is_delegation(&self) -> bool {
        self.is_empty() && self.requests.iter().any(LookupRequest::has_authority)
    }

    /// Sorted, de-duplicated union of all NS and SOA data.
    ///
    /// Computed on first use; requests must not change afterwards.
    pub fn nameservers(&self) -> &[String] {
        self.nameservers.get_or_init(|| {
            let mut all: Vec<String> = self
                .requests
                .iter()
                .flat_map(|r| r.nameservers.iter().chain(r.soa.iter()))
                .cloned()
                .collect();
            all.sort();
            all.dedup();
            all
        })
    }

    pub fn visible_requests(&self) -> impl Iterator<Item = &LookupRequest> {
        self.requests.iter().filter(|r| !r.hide)
    }
}

impl PartialEq for LookupResult {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
            && self.hostname == other.hostname
            && self.hide == other.hide
            && self.requests == other.requests
    }
}

impl Eq for LookupResult {}
