use super::{RequestFilter, ResponseFilter, ResultFilter};
use crate::dns_record::RecordType;
use crate::lookup::{LookupRequest, LookupResponse, LookupResult};
use fancy_regex::Regex;
use ipnetwork::IpNetwork;

/// Hides results where every request succeeded without data.
pub struct HideEmpty;

impl ResultFilter for HideEmpty {
    fn name(&self) -> &'static str {
        "hide-empty"
    }

    fn hides(&self, result: &LookupResult) -> bool {
        result.is_empty()
    }
}

/// Hides results that look like a delegated zone.
pub struct HideDelegations;

impl ResultFilter for HideDelegations {
    fn name(&self) -> &'static str {
        "hide-delegations"
    }

    fn hides(&self, result: &LookupResult) -> bool {
        result.is_delegation()
    }
}

/// Hides NXDOMAIN requests.
pub struct HideNotFound;

impl RequestFilter for HideNotFound {
    fn name(&self) -> &'static str {
        "hide-not-found"
    }

    fn hides(&self, request: &LookupRequest) -> bool {
        request.not_found
    }
}

/// Hides address responses inside any of the networks.
pub struct HideInNetworks {
    networks: Vec<IpNetwork>,
}

impl HideInNetworks {
    pub fn new(networks: Vec<IpNetwork>) -> Self {
        Self { networks }
    }
}

impl ResponseFilter for HideInNetworks {
    fn name(&self) -> &'static str {
        "hide-network"
    }

    fn hides(&self, response: &LookupResponse) -> bool {
        match response.address() {
            Some(ip) => self.networks.iter().any(|net| net.contains(ip)),
            None => false,
        }
    }
}

/// Hides address responses outside all of the networks.
///
/// Non-address responses are never hidden by this filter.
pub struct HideOutsideNetworks {
    networks: Vec<IpNetwork>,
}

impl HideOutsideNetworks {
    pub fn new(networks: Vec<IpNetwork>) -> Self {
        Self { networks }
    }
}

impl ResponseFilter for HideOutsideNetworks {
    fn name(&self) -> &'static str {
        "show-network"
    }

    fn hides(&self, response: &LookupResponse) -> bool {
        match response.address() {
            Some(ip) => !self.networks.iter().any(|net| net.contains(ip)),
            None => false,
        }
    }
}

/// Hides responses of one type whose target matches any of the patterns.
pub struct HideMatchingTargets {
    record_type: RecordType,
    patterns: Vec<Regex>,
}

impl HideMatchingTargets {
    pub fn new(record_type: RecordType, patterns: Vec<Regex>) -> Self {
        Self {
            record_type,
            patterns,
        }
    }
}

impl ResponseFilter for HideMatchingTargets {
    fn name(&self) -> &'static str {
        match self.record_type {
            RecordType::CNAME => "hide-cname",
            RecordType::PTR => "hide-ptr",
            _ => "hide-target",
        }
    }

    fn hides(&self, response: &LookupResponse) -> bool {
        if response.record_type != self.record_type {
            return false;
        }
        // A pattern that fails at match time (backtrack limit) never hides.
        self.patterns
            .iter()
            .any(|re| re.is_match(&response.data).unwrap_or(false))
    }
}
