use crate::errors::PipelineError;
use crate::producer::{recv_value, send_value};
use ferrous_sweep_domain::{Classifier, LookupResult};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Applies the configured hide filters to every result passing through.
pub struct ClassificationStage {
    classifier: Arc<Classifier>,
    shutdown: CancellationToken,
}

impl ClassificationStage {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self {
            classifier,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run(
        self,
        mut input: Receiver<LookupResult>,
        output: Sender<LookupResult>,
    ) -> Result<(), PipelineError> {
        let mut hidden = 0u64;
        let mut seen = 0u64;

        while let Some(mut result) = recv_value(&mut input, &self.shutdown).await {
            self.classifier.classify(&mut result);
            seen += 1;
            if result.hide {
                hidden += 1;
            }

            if !send_value(&output, result, &self.shutdown).await {
                break;
            }
        }

        info!(seen, hidden, "Classification stage finished");
        Ok(())
    }
}
