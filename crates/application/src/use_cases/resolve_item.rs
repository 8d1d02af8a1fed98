use crate::ports::{DnsExchanger, ExchangeOutcome};
use ferrous_sweep_domain::lookup::names_match;
use ferrous_sweep_domain::{
    DomainError, HostnameTemplate, LookupRequest, LookupResponse, LookupResult, RecordType,
};
use std::sync::Arc;
use tracing::debug;

/// Turns one swept value into a [`LookupResult`], one request per record
/// type, in configured order.
pub struct ResolveItemUseCase {
    exchanger: Arc<dyn DnsExchanger>,
    template: HostnameTemplate,
    record_types: Vec<RecordType>,
}

impl ResolveItemUseCase {
    pub fn new(
        exchanger: Arc<dyn DnsExchanger>,
        template: HostnameTemplate,
        record_types: Vec<RecordType>,
    ) -> Self {
        Self {
            exchanger,
            template,
            record_types,
        }
    }

    pub async fn execute(&self, item: &str) -> LookupResult {
        let hostname = self.template.substitute(item);
        let mut requests = Vec::with_capacity(self.record_types.len());

        for &record_type in &self.record_types {
            let outcome = self.exchanger.exchange(&hostname, record_type).await;
            requests.push(build_request(&hostname, record_type, outcome));
        }

        LookupResult::new(item, hostname).with_requests(requests)
    }
}

/// Interprets the reply to one query of `record_type` for `queried`.
pub fn build_request(
    queried: &str,
    record_type: RecordType,
    outcome: Result<ExchangeOutcome, DomainError>,
) -> LookupRequest {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(name = %queried, record_type = %record_type, error = %e, "Query failed");
            return LookupRequest::failed(record_type, e.to_string());
        }
    };

    let mut request = LookupRequest::from_status(record_type, outcome.status);

    request.responses = outcome
        .answers
        .iter()
        .filter(|rr| rr.record_type.is_answer_type() && names_match(&rr.name, queried))
        .map(|rr| LookupResponse::new(rr.record_type, rr.data.clone(), rr.ttl))
        .collect();

    for rr in outcome
        .authority
        .iter()
        .filter(|rr| names_match(&rr.name, queried))
    {
        match rr.record_type {
            RecordType::NS => request.nameservers.push(rr.data.clone()),
            RecordType::SOA => request.soa.push(rr.data.clone()),
            _ => {}
        }
    }

    request.raw = outcome.raw;
    request
}
