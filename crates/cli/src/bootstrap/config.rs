use ferrous_sweep_domain::{CliOverrides, Config, ScanConfig};
use tracing::info;

/// Loads the optional config file, applies flags and validates the result.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<(Config, ScanConfig)> {
    let config = Config::load(config_path, cli_overrides)?;
    let scan = config.validate()?;

    Ok((config, scan))
}

pub fn log_loaded(config_path: Option<&str>, scan: &ScanConfig) {
    info!(
        config_file = config_path.unwrap_or("none"),
        template = %scan.template,
        source = %scan.source.describe(),
        values = ?scan.source.known_count(),
        nameserver = %scan.nameserver,
        threads = scan.threads,
        "Configuration loaded"
    );
}
