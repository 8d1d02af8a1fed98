use crate::errors::PipelineError;
use crate::producer::{offer_count, send_value};
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drops the first `skip` values and lowers the count by the same amount.
pub struct SkipFilter {
    skip: u64,
    shutdown: CancellationToken,
}

impl SkipFilter {
    pub fn new(skip: u64) -> Self {
        Self {
            skip,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run(
        self,
        mut values_in: Receiver<String>,
        mut count_in: Receiver<u64>,
        values_out: Sender<String>,
        count_out: Sender<u64>,
    ) -> Result<(), PipelineError> {
        let skip = self.skip;
        let adjust = move |count: u64| count.saturating_sub(skip);
        let mut count_open = true;
        let mut skipped = 0u64;
        let mut forwarded = 0u64;

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = values_out.closed() => break,
                count = count_in.recv(), if count_open => {
                    count_open = false;
                    if let Some(count) = count {
                        offer_count(&count_out, adjust(count));
                    }
                }
                value = values_in.recv() => {
                    let Some(value) = value else { break };
                    if skipped < skip {
                        skipped += 1;
                        continue;
                    }
                    if !send_value(&values_out, value, &self.shutdown).await {
                        break;
                    }
                    forwarded += 1;
                }
            }
        }

        info!(skipped, forwarded, "Skip filter finished");
        drop(values_in);
        drop(values_out);

        if count_open {
            drain_count(&mut count_in, &count_out, adjust, &self.shutdown).await;
        }
        Ok(())
    }
}

/// Forwards at most `limit` values and caps the count at `limit`.
pub struct LimitFilter {
    limit: u64,
    shutdown: CancellationToken,
}

impl LimitFilter {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run(
        self,
        mut values_in: Receiver<String>,
        mut count_in: Receiver<u64>,
        values_out: Sender<String>,
        count_out: Sender<u64>,
    ) -> Result<(), PipelineError> {
        let limit = self.limit;
        let adjust = move |count: u64| count.min(limit);
        let mut count_open = true;
        let mut forwarded = 0u64;

        while forwarded < limit {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                count = count_in.recv(), if count_open => {
                    count_open = false;
                    if let Some(count) = count {
                        offer_count(&count_out, adjust(count));
                    }
                }
                value = values_in.recv() => {
                    let Some(value) = value else { break };
                    if !send_value(&values_out, value, &self.shutdown).await {
                        break;
                    }
                    forwarded += 1;
                }
            }
        }

        info!(forwarded, limit, "Limit filter finished");
        // Upstream sends fail from here on instead of blocking.
        drop(values_in);
        drop(values_out);

        if count_open {
            drain_count(&mut count_in, &count_out, adjust, &self.shutdown).await;
        }
        Ok(())
    }
}

/// Waits for a count that has not arrived yet, after the value stream
/// already ended.
async fn drain_count(
    count_in: &mut Receiver<u64>,
    count_out: &Sender<u64>,
    adjust: impl Fn(u64) -> u64,
    shutdown: &CancellationToken,
) {
    let count = tokio::select! {
        biased;
        _ = shutdown.cancelled() => None,
        _ = count_out.closed() => None,
        count = count_in.recv() => count,
    };

    if let Some(count) = count {
        debug!(count, "Late count forwarded");
        offer_count(count_out, adjust(count));
    }
}
