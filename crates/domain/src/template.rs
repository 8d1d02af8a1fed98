use crate::config::ConfigError;
use std::fmt;

pub const PLACEHOLDER: &str = "FUZZ";

/// Absolute hostname with a `FUZZ` placeholder, e.g. `host-FUZZ.example.org.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameTemplate {
    template: String,
}

impl HostnameTemplate {
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        let template = template.trim();
        if !template.contains(PLACEHOLDER) {
            return Err(ConfigError::TemplateWithoutPlaceholder(template.to_string()));
        }

        let mut template = template.to_string();
        if !template.ends_with('.') {
            template.push('.');
        }

        Ok(Self { template })
    }

    pub fn substitute(&self, value: &str) -> String {
        self.template.replace(PLACEHOLDER, value)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Template without the root dot, as stored in checkpoints.
    pub fn relative(&self) -> &str {
        crate::lookup::trim_root(&self.template)
    }
}

impl fmt::Display for HostnameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
