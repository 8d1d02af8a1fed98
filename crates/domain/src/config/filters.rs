use super::errors::ConfigError;
use fancy_regex::Regex;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

/// Display filters as written in the config file or on the command line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterOptions {
    /// Keep NXDOMAIN requests visible
    #[serde(default)]
    pub show_not_found: bool,

    #[serde(default)]
    pub hide_empty: bool,

    #[serde(default)]
    pub hide_delegations: bool,

    /// Hide addresses inside these networks (CIDR)
    #[serde(default)]
    pub hide_networks: Vec<String>,

    /// Only show addresses inside these networks (CIDR)
    #[serde(default)]
    pub show_networks: Vec<String>,

    /// Hide CNAME targets matching any of these patterns
    #[serde(default)]
    pub hide_cnames: Vec<String>,

    /// Hide PTR targets matching any of these patterns
    #[serde(default)]
    pub hide_ptrs: Vec<String>,
}

/// Parsed and compiled filter settings.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub show_not_found: bool,
    pub hide_empty: bool,
    pub hide_delegations: bool,
    pub hide_networks: Vec<IpNetwork>,
    pub show_networks: Vec<IpNetwork>,
    pub hide_cnames: Vec<Regex>,
    pub hide_ptrs: Vec<Regex>,
}

impl FilterOptions {
    pub fn validate(&self) -> Result<FilterConfig, ConfigError> {
        Ok(FilterConfig {
            show_not_found: self.show_not_found,
            hide_empty: self.hide_empty,
            hide_delegations: self.hide_delegations,
            hide_networks: parse_networks(&self.hide_networks)?,
            show_networks: parse_networks(&self.show_networks)?,
            hide_cnames: compile_patterns(&self.hide_cnames)?,
            hide_ptrs: compile_patterns(&self.hide_ptrs)?,
        })
    }
}

fn parse_networks(networks: &[String]) -> Result<Vec<IpNetwork>, ConfigError> {
    networks
        .iter()
        .map(|n| {
            let n = n.trim();
            if !n.contains('/') {
                return Err(ConfigError::InvalidNetwork {
                    network: n.to_string(),
                    reason: "CIDR must include prefix (e.g., 192.168.1.0/24)".to_string(),
                });
            }
            n.parse::<IpNetwork>()
                .map_err(|e| ConfigError::InvalidNetwork {
                    network: n.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| ConfigError::InvalidPattern {
                pattern: p.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}
