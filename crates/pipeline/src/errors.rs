use ferrous_sweep_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Checkpoint failed: {0}")]
    Checkpoint(DomainError),

    #[error("Failed to read source: {0}")]
    Source(String),

    #[error("Terminal output failed: {0}")]
    Output(DomainError),

    #[error("Pipeline stage {stage} failed: {reason}")]
    Join { stage: &'static str, reason: String },
}
