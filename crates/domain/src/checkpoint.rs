//! Serializable snapshot of a sweep, rewritten in full on every save.

use crate::config::{ScanConfig, SourceConfig};
use crate::dns_record::RecordType;
use crate::lookup::{LookupRequest, LookupResponse, LookupResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Run-level facts copied into every checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointMetadata {
    pub hostname: String,
    pub input_file: Option<String>,
    pub range: Option<String>,
    pub range_format: Option<String>,
}

impl CheckpointMetadata {
    pub fn from_config(config: &ScanConfig) -> Self {
        let mut metadata = Self {
            hostname: config.template.relative().to_string(),
            ..Self::default()
        };

        match &config.source {
            SourceConfig::Range {
                first,
                last,
                format,
            } => {
                metadata.range = Some(format!("{}-{}", first, last));
                metadata.range_format = Some(format.as_str().to_string());
            }
            SourceConfig::File(path) => {
                metadata.input_file = Some(path.display().to_string());
            }
            SourceConfig::Stdin => {
                metadata.input_file = Some("-".to_string());
            }
        }

        metadata
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointData {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub total_requests: u64,
    pub sent_requests: u64,
    pub shown_results: u64,
    pub hidden_results: u64,
    pub cancelled: bool,
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_format: Option<String>,
    pub results: Vec<RecordedResult>,
}

impl CheckpointData {
    pub fn new(metadata: CheckpointMetadata, start: DateTime<Local>) -> Self {
        Self {
            start,
            end: start,
            total_requests: 0,
            sent_requests: 0,
            shown_results: 0,
            hidden_results: 0,
            cancelled: false,
            hostname: metadata.hostname,
            input_file: metadata.input_file,
            range: metadata.range,
            range_format: metadata.range_format,
            results: Vec::new(),
        }
    }

    /// Accounts for one classified result.
    pub fn record(&mut self, result: &LookupResult) {
        self.sent_requests += 1;

        if result.hide {
            self.hidden_results += 1;
            return;
        }

        self.shown_results += 1;
        let projection = RecordedResult::from_result(result);
        if !projection.is_empty() {
            self.results.push(projection);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResult {
    pub item: String,
    pub hostname: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub potential_suffix: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub potential_delegation: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
    pub requests: Vec<RecordedRequest>,
}

impl RecordedResult {
    /// Projection of the visible part of a result.
    pub fn from_result(result: &LookupResult) -> Self {
        let delegation = result.is_delegation();

        Self {
            item: result.item.clone(),
            hostname: result.hostname.clone(),
            potential_suffix: result.is_empty() && !delegation,
            potential_delegation: delegation,
            nameservers: if delegation {
                result.nameservers().to_vec()
            } else {
                Vec::new()
            },
            requests: result
                .visible_requests()
                .map(RecordedRequest::from_request)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRequest {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub responses: Vec<RecordedResponse>,
    pub raw: RecordedRaw,
}

impl RecordedRequest {
    fn from_request(request: &LookupRequest) -> Self {
        Self {
            record_type: request.record_type,
            status: request.status.clone(),
            error: request.error.clone(),
            responses: request
                .visible_responses()
                .map(RecordedResponse::from_response)
                .collect(),
            raw: RecordedRaw {
                question: request.raw.question.clone(),
                answer: request.raw.answer.clone(),
                nameserver: request.raw.authority.clone(),
                extra: request.raw.additional.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResponse {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub data: String,
    pub ttl: u32,
}

impl RecordedResponse {
    fn from_response(response: &LookupResponse) -> Self {
        Self {
            record_type: response.record_type,
            data: response.data.clone(),
            ttl: response.ttl,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRaw {
    #[serde(default)]
    pub question: Vec<String>,
    #[serde(default)]
    pub answer: Vec<String>,
    #[serde(default)]
    pub nameserver: Vec<String>,
    #[serde(default)]
    pub extra: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
