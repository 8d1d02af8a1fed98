use crate::errors::PipelineError;
use crate::producer::{recv_value, send_value};
use std::time::Duration;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

const MAX_GAP: Duration = Duration::from_secs(24 * 60 * 60);

/// Lets values through no faster than a fixed rate.
pub struct RateLimiter {
    gap: Duration,
    shutdown: CancellationToken,
}

impl RateLimiter {
    /// `None` when `requests_per_second` does not limit anything.
    pub fn new(requests_per_second: f64) -> Option<Self> {
        if requests_per_second.is_nan() || requests_per_second <= 0.0 {
            return None;
        }

        let gap = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .unwrap_or(MAX_GAP)
            .clamp(Duration::from_nanos(1), MAX_GAP);

        Some(Self {
            gap,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    pub async fn run(
        self,
        mut input: Receiver<String>,
        output: Sender<String>,
    ) -> Result<(), PipelineError> {
        let mut ticker = tokio::time::interval(self.gap);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut admitted = 0u64;

        info!(gap_ms = self.gap.as_millis() as u64, "Rate limiter started");

        while let Some(value) = recv_value(&mut input, &self.shutdown).await {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            if !send_value(&output, value, &self.shutdown).await {
                break;
            }
            admitted += 1;
        }

        info!(admitted, "Rate limiter finished");
        Ok(())
    }
}
