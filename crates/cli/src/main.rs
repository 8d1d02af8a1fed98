//! # ferrous-sweep
//!
//! Sweeps a DNS name space: substitutes values into a hostname template,
//! queries each name and reports what exists.

mod bootstrap;
mod terminal;

use bootstrap::{init_logging, load_config};
use clap::Parser;
use console::Term;
use ferrous_sweep_domain::{CheckpointMetadata, CliOverrides};
use ferrous_sweep_infrastructure::{open_value_source, HickoryExchanger, JsonCheckpointStore};
use ferrous_sweep_pipeline::{format_duration, Pipeline};
use std::path::PathBuf;
use std::sync::Arc;
use terminal::ConsoleOutput;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ferrous-sweep")]
#[command(version)]
#[command(about = "Find existing names by sweeping a hostname template through DNS")]
struct Cli {
    /// Hostname template, `FUZZ` is replaced by each value
    template: Option<String>,

    /// Path to a TOML config file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Range of values to test, `first-last`
    #[arg(short = 'r', long)]
    range: Option<String>,

    /// printf-style format applied to range values
    #[arg(long)]
    range_format: Option<String>,

    /// File with one value per line, `-` for stdin
    #[arg(short = 'f', long)]
    file: Option<String>,

    /// Number of parallel resolver workers
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Maximum requests per second, 0 for unlimited
    #[arg(long)]
    requests_per_second: Option<f64>,

    /// Values buffered ahead of the resolvers
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Skip the first N values
    #[arg(long)]
    skip: Option<u64>,

    /// Process at most N values
    #[arg(long)]
    limit: Option<u64>,

    /// Record types to request, comma separated
    #[arg(long, value_delimiter = ',')]
    request_types: Option<Vec<String>>,

    /// Nameserver to query, `ip` or `ip:port`
    #[arg(short = 's', long)]
    nameserver: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Write PREFIX.json and PREFIX.log
    #[arg(long)]
    logfile: Option<String>,

    /// Directory for automatically named log files
    #[arg(long, env = "FERROUS_SWEEP_LOG_DIR")]
    logdir: Option<String>,

    /// Also show names that do not exist
    #[arg(long)]
    show_not_found: bool,

    /// Hide names that exist but hold no requested data
    #[arg(long)]
    hide_empty: bool,

    /// Hide potential delegations
    #[arg(long)]
    hide_delegations: bool,

    /// Hide addresses inside this network (repeatable)
    #[arg(long = "hide-network")]
    hide_networks: Vec<String>,

    /// Only show addresses inside this network (repeatable)
    #[arg(long = "show-network")]
    show_networks: Vec<String>,

    /// Hide CNAME targets matching this pattern (repeatable)
    #[arg(long = "hide-cname")]
    hide_cnames: Vec<String>,

    /// Hide PTR targets matching this pattern (repeatable)
    #[arg(long = "hide-ptr")]
    hide_ptrs: Vec<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            template: self.template.clone(),
            range: self.range.clone(),
            range_format: self.range_format.clone(),
            file: self.file.clone(),
            threads: self.threads,
            requests_per_second: self.requests_per_second,
            buffer_size: self.buffer_size,
            skip: self.skip,
            limit: self.limit,
            request_types: self.request_types.clone(),
            nameserver: self.nameserver.clone(),
            timeout_ms: self.timeout_ms,
            logfile: self.logfile.clone(),
            logdir: self.logdir.clone(),
            show_not_found: self.show_not_found.then_some(true),
            hide_empty: self.hide_empty.then_some(true),
            hide_delegations: self.hide_delegations.then_some(true),
            hide_networks: self.hide_networks.clone(),
            show_networks: self.show_networks.clone(),
            hide_cnames: self.hide_cnames.clone(),
            hide_ptrs: self.hide_ptrs.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, scan) = load_config(cli.config.as_deref(), cli.overrides())?;
    init_logging(&config.logging);
    bootstrap::config::log_loaded(cli.config.as_deref(), &scan);

    let source = open_value_source(&scan.source).await?;

    let mut output = ConsoleOutput::new(Term::stdout());
    if let Some(prefix) = &scan.log_prefix {
        let command_line = std::env::args().collect::<Vec<_>>().join(" ");
        output = output.with_log_file(&with_extension(prefix, "log"), &command_line)?;
    }

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping sweep");
            shutdown.cancel();
        }
    });

    let exchanger = Arc::new(HickoryExchanger::new(scan.nameserver, scan.timeout));
    let mut pipeline = Pipeline::new(scan.clone(), exchanger);

    let mut checkpoint = None;
    if let Some(prefix) = &scan.log_prefix {
        let store = JsonCheckpointStore::for_prefix(prefix);
        checkpoint = Some(store.path().to_path_buf());
        pipeline = pipeline.with_recorder(Arc::new(store), CheckpointMetadata::from_config(&scan));
    }

    let summary = pipeline.run(source, Box::new(output), token).await?;

    info!(
        processed = summary.report.processed,
        shown = summary.report.shown,
        elapsed = %format_duration(summary.report.elapsed),
        cancelled = summary.cancelled,
        "Sweep finished"
    );
    if let Some(path) = checkpoint {
        info!(path = %path.display(), "Checkpoint saved");
    }

    Ok(())
}

fn with_extension(prefix: &std::path::Path, extension: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
