#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_sweep_application::ports::{DnsExchanger, ExchangeOutcome, ExchangedRecord};
use ferrous_sweep_domain::{DomainError, RecordType};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock DnsExchanger
// ============================================================================

/// Answers from a fixed table; anything not in the table is NXDOMAIN.
#[derive(Clone, Default)]
pub struct MockExchanger {
    answers: Arc<Mutex<HashMap<(String, RecordType), Result<ExchangeOutcome, DomainError>>>>,
    calls: Arc<Mutex<Vec<(String, RecordType)>>>,
}

impl MockExchanger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, record_type: RecordType, outcome: ExchangeOutcome) {
        self.answers
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), Ok(outcome));
    }

    pub fn set_address(&self, name: &str, record_type: RecordType, data: &str) {
        let outcome = ExchangeOutcome {
            status: "NOERROR".into(),
            answers: vec![ExchangedRecord::new(name, record_type, data, 300)],
            ..Default::default()
        };
        self.set(name, record_type, outcome);
    }

    pub fn set_error(&self, name: &str, record_type: RecordType, error: DomainError) {
        self.answers
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), Err(error));
    }

    pub fn calls(&self) -> Vec<(String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsExchanger for MockExchanger {
    async fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<ExchangeOutcome, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), record_type));

        self.answers
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_else(|| Ok(ExchangeOutcome::with_status("NXDOMAIN")))
    }
}
