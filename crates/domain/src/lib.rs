//! ferrous-sweep domain layer
pub mod checkpoint;
pub mod classification;
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod lookup;
pub mod range_format;
pub mod template;

pub use checkpoint::{
    CheckpointData, CheckpointMetadata, RecordedRaw, RecordedRequest, RecordedResponse,
    RecordedResult,
};
pub use classification::{Classifier, RequestFilter, ResponseFilter, ResultFilter};
pub use config::{
    CliOverrides, Config, ConfigError, FilterConfig, FilterOptions, ScanConfig, ScanOptions,
    SourceConfig,
};
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use lookup::{LookupRequest, LookupResponse, LookupResult, RawSections};
pub use range_format::RangeFormat;
pub use template::HostnameTemplate;
