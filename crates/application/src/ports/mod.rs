pub mod checkpoint_store;
pub mod dns_exchanger;
pub mod report_output;
pub mod value_source;

pub use checkpoint_store::CheckpointStore;
pub use dns_exchanger::{DnsExchanger, ExchangeOutcome, ExchangedRecord};
pub use report_output::ReportOutput;
pub use value_source::{LineReader, ValueSource};
