use ferrous_sweep_domain::config::LoggingConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    info!("Logging initialized at level: {}", config.level);
}
