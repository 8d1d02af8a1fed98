use crate::errors::PipelineError;
use crate::producer::send_value;
use chrono::Local;
use ferrous_sweep_application::ports::CheckpointStore;
use ferrous_sweep_domain::{CheckpointData, CheckpointMetadata, LookupResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const CHECKPOINT_INTERVAL: Duration = Duration::from_secs(1);

/// Which side of the count handoff is live. Moves forward exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountState {
    AwaitingCount,
    HaveCount(u64),
}

/// Pass-through stage that keeps a checkpoint of everything it forwarded.
pub struct Recorder {
    store: Arc<dyn CheckpointStore>,
    data: CheckpointData,
    interval: Duration,
    shutdown: CancellationToken,
}

impl Recorder {
    pub fn new(store: Arc<dyn CheckpointStore>, metadata: CheckpointMetadata) -> Self {
        Self {
            store,
            data: CheckpointData::new(metadata, Local::now()),
            interval: CHECKPOINT_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Minimum time between two intermediate checkpoints.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub async fn run(
        mut self,
        mut results_in: Receiver<LookupResult>,
        mut count_in: Receiver<u64>,
        results_out: Sender<LookupResult>,
        count_out: Sender<u64>,
    ) -> Result<(), PipelineError> {
        info!(destination = %self.store.location(), "Recorder started");

        let mut state = CountState::AwaitingCount;
        let mut count_open = true;
        let mut offer_open = true;
        let mut last_write = Instant::now();

        loop {
            let result = match state {
                CountState::AwaitingCount => tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => break,
                    count = count_in.recv(), if count_open => {
                        match count {
                            Some(total) => {
                                debug!(total, "Total count received");
                                self.data.total_requests = total;
                                state = CountState::HaveCount(total);
                            }
                            None => count_open = false,
                        }
                        continue;
                    }
                    result = results_in.recv() => result,
                },
                CountState::HaveCount(total) => tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => break,
                    permit = count_out.reserve(), if offer_open => {
                        match permit {
                            Ok(permit) => permit.send(total),
                            Err(_) => offer_open = false,
                        }
                        continue;
                    }
                    result = results_in.recv() => result,
                },
            };

            let Some(result) = result else { break };

            // Forward first; the checkpoint only counts what went downstream.
            if !send_value(&results_out, result.clone(), &self.shutdown).await {
                break;
            }
            self.data.record(&result);

            if last_write.elapsed() >= self.interval {
                self.write().await?;
                last_write = Instant::now();
            }
        }

        drop(results_out);
        if state == CountState::AwaitingCount {
            if let Ok(total) = count_in.try_recv() {
                self.data.total_requests = total;
            }
        }
        self.data.cancelled = self.shutdown.is_cancelled();
        if self.data.cancelled {
            warn!("Recorder cancelled, writing final checkpoint");
        }
        self.write().await?;

        info!(
            sent = self.data.sent_requests,
            shown = self.data.shown_results,
            hidden = self.data.hidden_results,
            "Recorder finished"
        );
        Ok(())
    }

    async fn write(&mut self) -> Result<(), PipelineError> {
        self.data.end = Local::now();
        self.store
            .save(&self.data)
            .await
            .map_err(PipelineError::Checkpoint)?;
        debug!(results = self.data.results.len(), "Checkpoint written");
        Ok(())
    }
}
