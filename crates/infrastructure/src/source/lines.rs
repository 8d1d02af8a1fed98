use ferrous_sweep_application::ports::ValueSource;
use ferrous_sweep_domain::{DomainError, SourceConfig};
use tokio::io::BufReader;
use tracing::info;

/// Opens the configured source. File errors surface here, before the
/// pipeline starts.
pub async fn open_value_source(config: &SourceConfig) -> Result<ValueSource, DomainError> {
    match config {
        SourceConfig::Range {
            first,
            last,
            format,
        } => Ok(ValueSource::Range {
            first: *first,
            last: *last,
            format: format.clone(),
        }),
        SourceConfig::File(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| DomainError::SourceOpen {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            info!(path = %path.display(), "Reading values from file");
            Ok(ValueSource::Lines(Box::new(BufReader::new(file))))
        }
        SourceConfig::Stdin => {
            info!("Reading values from stdin");
            Ok(ValueSource::Lines(Box::new(BufReader::new(
                tokio::io::stdin(),
            ))))
        }
    }
}
