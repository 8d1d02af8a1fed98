use async_trait::async_trait;
use ferrous_sweep_domain::{CheckpointData, DomainError};

/// Durable destination for checkpoint snapshots.
///
/// Every `save` replaces the previous snapshot completely; readers never
/// see a partially written one.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    async fn save(&self, data: &CheckpointData) -> Result<(), DomainError>;

    /// Human readable location, for log messages.
    fn location(&self) -> String;
}
