use crate::errors::PipelineError;
use crate::producer::send_value;
use ferrous_sweep_application::ResolveItemUseCase;
use ferrous_sweep_domain::LookupResult;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Fixed set of workers resolving values concurrently.
///
/// The pool ends when its input is closed and drained. The output channel
/// closes only after every worker has returned, since the supervisor holds
/// its own sender until the last join.
pub struct ResolverPool {
    use_case: Arc<ResolveItemUseCase>,
    workers: usize,
    shutdown: CancellationToken,
}

impl ResolverPool {
    pub fn new(use_case: Arc<ResolveItemUseCase>, workers: usize) -> Self {
        Self {
            use_case,
            workers: workers.max(1),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run(
        self,
        input: Receiver<String>,
        output: Sender<LookupResult>,
    ) -> Result<(), PipelineError> {
        let input = Arc::new(Mutex::new(input));
        let mut workers = JoinSet::new();

        for id in 0..self.workers {
            workers.spawn(worker(
                id,
                Arc::clone(&self.use_case),
                Arc::clone(&input),
                output.clone(),
                self.shutdown.clone(),
            ));
        }
        info!(workers = self.workers, "Resolver pool started");

        let mut resolved = 0u64;
        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(count) => resolved += count,
                Err(e) => {
                    error!(error = %e, "Resolver worker failed");
                    failure.get_or_insert(PipelineError::Join {
                        stage: "resolver worker",
                        reason: e.to_string(),
                    });
                }
            }
        }

        drop(output);
        info!(resolved, "Resolver pool finished");

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

async fn worker(
    id: usize,
    use_case: Arc<ResolveItemUseCase>,
    input: Arc<Mutex<Receiver<String>>>,
    output: Sender<LookupResult>,
    shutdown: CancellationToken,
) -> u64 {
    let mut resolved = 0u64;
    let mut downstream_open = true;

    loop {
        let value = {
            let mut rx = input.lock().await;
            rx.recv().await
        };
        let Some(value) = value else { break };

        // Keep draining so upstream never blocks, but stop querying.
        if !downstream_open || shutdown.is_cancelled() {
            continue;
        }

        let result = use_case.execute(&value).await;
        resolved += 1;

        if !send_value(&output, result, &shutdown).await {
            downstream_open = false;
        }
    }

    debug!(worker = id, resolved, "Resolver worker exiting");
    resolved
}
