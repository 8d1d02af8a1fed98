use crate::errors::PipelineError;
use crate::marker::ClassificationStage;
use crate::producer::ValueProducer;
use crate::rate_limit::RateLimiter;
use crate::recorder::Recorder;
use crate::reporter::{ReportSummary, Reporter};
use crate::resolver_pool::ResolverPool;
use crate::volume::{LimitFilter, SkipFilter};
use ferrous_sweep_application::ports::{CheckpointStore, DnsExchanger, ReportOutput, ValueSource};
use ferrous_sweep_application::ResolveItemUseCase;
use ferrous_sweep_domain::{CheckpointMetadata, Classifier, ScanConfig};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

type StageHandle = (&'static str, JoinHandle<Result<(), PipelineError>>);

/// Outcome of a completed sweep.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: ReportSummary,
    pub cancelled: bool,
}

/// Wires the sweep stages together and drives them to completion.
pub struct Pipeline {
    config: ScanConfig,
    exchanger: Arc<dyn DnsExchanger>,
    recorder: Option<(Arc<dyn CheckpointStore>, CheckpointMetadata)>,
}

impl Pipeline {
    pub fn new(config: ScanConfig, exchanger: Arc<dyn DnsExchanger>) -> Self {
        Self {
            config,
            exchanger,
            recorder: None,
        }
    }

    /// Adds the checkpointing stage between classification and reporting.
    pub fn with_recorder(
        mut self,
        store: Arc<dyn CheckpointStore>,
        metadata: CheckpointMetadata,
    ) -> Self {
        self.recorder = Some((store, metadata));
        self
    }

    pub async fn run(
        self,
        source: ValueSource,
        output: Box<dyn ReportOutput>,
        token: CancellationToken,
    ) -> Result<RunSummary, PipelineError> {
        let config = self.config;
        info!(
            template = %config.template,
            source = %config.source.describe(),
            threads = config.threads,
            record_types = ?config.record_types,
            "Starting sweep"
        );

        let mut stages: Vec<StageHandle> = Vec::new();

        let (values_tx, values_rx) = mpsc::channel(config.buffer_size.max(1));
        let (count_tx, count_rx) = mpsc::channel(1);
        stages.push(spawn_stage(
            "producer",
            &token,
            ValueProducer::new(source)
                .with_cancellation(token.clone())
                .run(values_tx, count_tx),
        ));
        let (mut values, mut count) = (values_rx, count_rx);

        if config.skip > 0 {
            let (vtx, vrx) = mpsc::channel(1);
            let (ctx, crx) = mpsc::channel(1);
            stages.push(spawn_stage(
                "skip",
                &token,
                SkipFilter::new(config.skip)
                    .with_cancellation(token.clone())
                    .run(values, count, vtx, ctx),
            ));
            (values, count) = (vrx, crx);
        }

        if config.limit > 0 {
            let (vtx, vrx) = mpsc::channel(1);
            let (ctx, crx) = mpsc::channel(1);
            stages.push(spawn_stage(
                "limit",
                &token,
                LimitFilter::new(config.limit)
                    .with_cancellation(token.clone())
                    .run(values, count, vtx, ctx),
            ));
            (values, count) = (vrx, crx);
        }

        if let Some(limiter) = RateLimiter::new(config.requests_per_second) {
            let (vtx, vrx) = mpsc::channel(1);
            stages.push(spawn_stage(
                "rate limiter",
                &token,
                limiter.with_cancellation(token.clone()).run(values, vtx),
            ));
            values = vrx;
        }

        let use_case = Arc::new(ResolveItemUseCase::new(
            self.exchanger,
            config.template.clone(),
            config.record_types.clone(),
        ));
        let (resolved_tx, resolved_rx) = mpsc::channel(1);
        stages.push(spawn_stage(
            "resolver pool",
            &token,
            ResolverPool::new(use_case, config.threads)
                .with_cancellation(token.clone())
                .run(values, resolved_tx),
        ));

        let classifier = Arc::new(Classifier::from_config(&config.filters));
        let (marked_tx, marked_rx) = mpsc::channel(1);
        stages.push(spawn_stage(
            "classification",
            &token,
            ClassificationStage::new(classifier)
                .with_cancellation(token.clone())
                .run(resolved_rx, marked_tx),
        ));
        let mut results = marked_rx;

        if let Some((store, metadata)) = self.recorder {
            let (rtx, rrx) = mpsc::channel(1);
            let (ctx, crx) = mpsc::channel(1);
            stages.push(spawn_stage(
                "recorder",
                &token,
                Recorder::new(store, metadata)
                    .with_cancellation(token.clone())
                    .run(results, count, rtx, ctx),
            ));
            (results, count) = (rrx, crx);
        }

        let reporter = Reporter::new(output, config.template.as_str())
            .with_cancellation(token.clone());
        let reporter_token = token.clone();
        let reporter = tokio::spawn(async move {
            let outcome = reporter.run(results, count).await;
            if outcome.is_err() {
                reporter_token.cancel();
            }
            outcome
        });

        let report = match reporter.await {
            Ok(outcome) => outcome,
            Err(e) => {
                token.cancel();
                Err(PipelineError::Join {
                    stage: "reporter",
                    reason: e.to_string(),
                })
            }
        };

        let mut first_error = None;
        for (stage, handle) in stages {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(PipelineError::Join {
                    stage,
                    reason: e.to_string(),
                }),
            };
            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        let report = report?;

        let cancelled = token.is_cancelled();
        if cancelled {
            warn!(processed = report.processed, "Sweep cancelled");
        } else {
            info!(processed = report.processed, "Sweep complete");
        }

        Ok(RunSummary { report, cancelled })
    }
}

fn spawn_stage<F>(name: &'static str, token: &CancellationToken, stage: F) -> StageHandle
where
    F: Future<Output = Result<(), PipelineError>> + Send + 'static,
{
    let token = token.clone();
    let handle = tokio::spawn(async move {
        let outcome = stage.await;
        if let Err(e) = &outcome {
            error!(stage = name, error = %e, "Pipeline stage failed");
            token.cancel();
        }
        outcome
    });
    (name, handle)
}
