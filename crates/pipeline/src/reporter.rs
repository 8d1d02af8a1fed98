use crate::errors::PipelineError;
use ferrous_sweep_application::ports::ReportOutput;
use ferrous_sweep_domain::{LookupRequest, LookupResult, RecordType};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

const STATUS_INTERVAL: Duration = Duration::from_secs(1);

/// Counters the reporter hands back once the stream has ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub processed: u64,
    pub shown: u64,
    pub errors: u64,
    pub empty: u64,
    pub delegations: u64,
    pub unique: BTreeMap<RecordType, usize>,
    pub total: Option<u64>,
    pub elapsed: Duration,
}

/// Running statistics over every result seen by the reporter.
#[derive(Debug)]
pub struct Stats {
    start: Instant,
    processed: u64,
    shown: u64,
    errors: u64,
    empty: u64,
    delegations: u64,
    unique: BTreeMap<RecordType, BTreeSet<String>>,
    total: Option<u64>,
    current: String,
    rate: f64,
    rate_updated: Option<Instant>,
}

impl Stats {
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            processed: 0,
            shown: 0,
            errors: 0,
            empty: 0,
            delegations: 0,
            unique: BTreeMap::new(),
            total: None,
            current: String::new(),
            rate: 0.0,
            rate_updated: None,
        }
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = Some(total);
    }

    /// Accounts for one result. `shown` tells whether a line was printed.
    pub fn update(&mut self, result: &LookupResult, shown: bool) {
        self.processed += 1;
        self.current = result.item.clone();
        if shown {
            self.shown += 1;
        }

        if !result.hide {
            if result.is_delegation() {
                self.delegations += 1;
            } else if result.is_empty() {
                self.empty += 1;
            }
        }

        for request in result.requests.iter().filter(|r| !r.hide) {
            if request.error.is_some() || (request.failure && !request.not_found) {
                self.errors += 1;
            }
            for response in request.visible_responses() {
                self.unique
                    .entry(response.record_type)
                    .or_default()
                    .insert(response.data.clone());
            }
        }
    }

    /// Requests per second, refreshed at most once per second.
    fn refresh_rate(&mut self, now: Instant) {
        let due = self
            .rate_updated
            .map_or(true, |at| now.duration_since(at) >= STATUS_INTERVAL);
        if !due {
            return;
        }

        let elapsed = now.duration_since(self.start).as_secs_f64();
        if elapsed > 0.0 {
            self.rate = self.processed as f64 / elapsed;
        }
        self.rate_updated = Some(now);
    }

    pub fn remaining(&self) -> Option<u64> {
        self.total.map(|t| t.saturating_sub(self.processed))
    }

    fn eta(&self) -> Option<Duration> {
        let remaining = self.remaining()?;
        if self.rate <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(remaining as f64 / self.rate).ok()
    }

    /// Status block lines, starting with an empty separator line.
    pub fn report(&mut self, now: Instant) -> Vec<String> {
        self.refresh_rate(now);

        let todo = self
            .remaining()
            .map_or_else(|| "?".to_string(), |r| r.to_string());
        let eta = self
            .eta()
            .map_or_else(|| "?".to_string(), format_duration);

        let mut lines = vec![
            String::new(),
            format!(
                "{} of {} results shown, {:.0} req/s, {} todo, {} remaining, current: {}",
                self.shown, self.processed, self.rate, todo, eta, self.current
            ),
            format!("errors:       {}", self.errors),
            format!("empty:        {}", self.empty),
            format!("delegations:  {}", self.delegations),
        ];
        for (record_type, values) in &self.unique {
            lines.push(format!(
                "{:<13} {} unique",
                format!("{}:", record_type),
                values.len()
            ));
        }
        lines
    }

    pub fn summary(&self, now: Instant) -> ReportSummary {
        ReportSummary {
            processed: self.processed,
            shown: self.shown,
            errors: self.errors,
            empty: self.empty,
            delegations: self.delegations,
            unique: self
                .unique
                .iter()
                .map(|(t, values)| (*t, values.len()))
                .collect(),
            total: self.total,
            elapsed: now.duration_since(self.start),
        }
    }
}

/// Formats whole seconds as `XhYYmZZs`, or `XmYYs` below an hour.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h{:02}m{:02}s", h, m, s)
    } else {
        format!("{}m{:02}s", m, s)
    }
}

/// Text describing the visible part of a result, `None` when nothing is
/// left to show.
pub fn describe(result: &LookupResult) -> Option<String> {
    if result.is_delegation() {
        return Some(format!(
            "potential delegation, nameservers: {}",
            result.nameservers().join(", ")
        ));
    }
    if result.is_empty() {
        return Some("empty".to_string());
    }

    let parts: Vec<String> = result
        .visible_requests()
        .flat_map(describe_request)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn describe_request(request: &LookupRequest) -> Vec<String> {
    if let Some(error) = &request.error {
        return vec![format!("{} error: {}", request.record_type, error)];
    }
    if request.failure {
        return vec![format!("{} {}", request.record_type, request.status)];
    }
    request
        .visible_responses()
        .map(|r| format!("{} {}", r.record_type, r.data))
        .collect()
}

/// Terminal sink: prints shown results and keeps the status block fresh.
pub struct Reporter {
    output: Box<dyn ReportOutput>,
    template: String,
    width: usize,
    shutdown: CancellationToken,
}

impl Reporter {
    pub fn new(output: Box<dyn ReportOutput>, template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            width: template.len() + 10,
            template,
            output,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run(
        mut self,
        mut results: Receiver<LookupResult>,
        mut count: Receiver<u64>,
    ) -> Result<ReportSummary, PipelineError> {
        let mut stats = Stats::new(Instant::now());
        let mut last_status: Option<Instant> = None;

        self.print(&format!("hostname template: {}", self.template))?;
        self.print("")?;
        self.print(&format!("{:<width$} {}", "hostname", "response", width = self.width))?;

        loop {
            let result = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                result = results.recv() => result,
            };
            let Some(result) = result else { break };

            if let Ok(total) = count.try_recv() {
                stats.set_total(total);
            }

            let line = if result.hide { None } else { describe(&result) };
            if let Some(details) = &line {
                self.print(&format!(
                    "{:<width$} {}",
                    result.hostname,
                    details,
                    width = self.width
                ))?;
            }
            stats.update(&result, line.is_some());

            let now = Instant::now();
            if last_status.map_or(true, |at| now.duration_since(at) >= STATUS_INTERVAL) {
                let lines = stats.report(now);
                self.output.set_status(&lines).map_err(PipelineError::Output)?;
                last_status = Some(now);
            }
        }

        if let Ok(total) = count.try_recv() {
            stats.set_total(total);
        }

        let now = Instant::now();
        let summary = stats.summary(now);
        let mut lines = stats.report(now);
        lines[1] = format!(
            "processed {} items in {}",
            summary.processed,
            format_duration(summary.elapsed)
        );

        self.output.finish().map_err(PipelineError::Output)?;
        for line in &lines {
            self.print(line)?;
        }

        info!(processed = summary.processed, shown = summary.shown, "Reporter finished");
        Ok(summary)
    }

    fn print(&mut self, line: &str) -> Result<(), PipelineError> {
        self.output.print_line(line).map_err(PipelineError::Output)
    }
}
