//! Hide-marking of lookup results in three tiers.
//!
//! Result filters run first; the first match hides the whole result and
//! nothing else is evaluated. Otherwise each request goes through the
//! request filters, and the responses of every request that survived are
//! marked by the response filters. A result whose requests all ended up
//! hidden is hidden as well.

pub mod filters;

pub use filters::{
    HideDelegations, HideEmpty, HideInNetworks, HideMatchingTargets, HideNotFound,
    HideOutsideNetworks,
};

use crate::config::FilterConfig;
use crate::dns_record::RecordType;
use crate::lookup::{LookupRequest, LookupResponse, LookupResult};

pub trait ResultFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn hides(&self, result: &LookupResult) -> bool;
}

pub trait RequestFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn hides(&self, request: &LookupRequest) -> bool;
}

pub trait ResponseFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn hides(&self, response: &LookupResponse) -> bool;
}

#[derive(Default)]
pub struct Classifier {
    result_filters: Vec<Box<dyn ResultFilter>>,
    request_filters: Vec<Box<dyn RequestFilter>>,
    response_filters: Vec<Box<dyn ResponseFilter>>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the filter set described by a validated configuration.
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut classifier = Self::new();

        if !config.show_not_found {
            classifier = classifier.with_request_filter(HideNotFound);
        }
        if config.hide_empty {
            classifier = classifier.with_result_filter(HideEmpty);
        }
        if config.hide_delegations {
            classifier = classifier.with_result_filter(HideDelegations);
        }
        if !config.hide_networks.is_empty() {
            classifier =
                classifier.with_response_filter(HideInNetworks::new(config.hide_networks.clone()));
        }
        if !config.show_networks.is_empty() {
            classifier = classifier
                .with_response_filter(HideOutsideNetworks::new(config.show_networks.clone()));
        }
        if !config.hide_cnames.is_empty() {
            classifier = classifier.with_response_filter(HideMatchingTargets::new(
                RecordType::CNAME,
                config.hide_cnames.clone(),
            ));
        }
        if !config.hide_ptrs.is_empty() {
            classifier = classifier.with_response_filter(HideMatchingTargets::new(
                RecordType::PTR,
                config.hide_ptrs.clone(),
            ));
        }

        classifier
    }

    pub fn with_result_filter(mut self, filter: impl ResultFilter + 'static) -> Self {
        self.result_filters.push(Box::new(filter));
        self
    }

    pub fn with_request_filter(mut self, filter: impl RequestFilter + 'static) -> Self {
        self.request_filters.push(Box::new(filter));
        self
    }

    pub fn with_response_filter(mut self, filter: impl ResponseFilter + 'static) -> Self {
        self.response_filters.push(Box::new(filter));
        self
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.result_filters
            .iter()
            .map(|f| f.name())
            .chain(self.request_filters.iter().map(|f| f.name()))
            .chain(self.response_filters.iter().map(|f| f.name()))
            .collect()
    }

    /// Sets every hide flag of `result` from scratch.
    ///
    /// Flags left over from an earlier pass are cleared first, so running
    /// this twice yields the same marks.
    pub fn classify(&self, result: &mut LookupResult) {
        result.hide = false;
        for request in &mut result.requests {
            request.hide = false;
            for response in &mut request.responses {
                response.hide = false;
            }
        }

        if self.result_filters.iter().any(|f| f.hides(result)) {
            result.hide = true;
            return;
        }

        for request in &mut result.requests {
            if self.request_filters.iter().any(|f| f.hides(request)) {
                request.hide = true;
                continue;
            }

            for response in &mut request.responses {
                response.hide = self.response_filters.iter().any(|f| f.hides(response));
            }
        }

        if !result.requests.is_empty() && result.requests.iter().all(|r| r.hide) {
            result.hide = true;
        }
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("filters", &self.filter_names())
            .finish()
    }
}
