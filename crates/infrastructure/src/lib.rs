//! ferrous-sweep infrastructure: UDP exchanger, checkpoint file, sources.
pub mod checkpoint;
pub mod dns;
pub mod source;

pub use checkpoint::JsonCheckpointStore;
pub use dns::HickoryExchanger;
pub use source::open_value_source;
