use crate::range_format::RangeFormat;
use std::path::PathBuf;

/// Where swept values come from. Exactly one source per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Range {
        first: u64,
        last: u64,
        format: RangeFormat,
    },
    File(PathBuf),
    /// Selected with a file name of `-`.
    Stdin,
}

impl SourceConfig {
    /// Number of values, when known before reading the source. `None` also
    /// for the full `0-18446744073709551615` range, which has no u64 count.
    pub fn known_count(&self) -> Option<u64> {
        match self {
            SourceConfig::Range { first, last, .. } => (last - first).checked_add(1),
            SourceConfig::File(_) | SourceConfig::Stdin => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceConfig::Range {
                first,
                last,
                format,
            } => format!("range {}-{} ({})", first, last, format),
            SourceConfig::File(path) => format!("file {}", path.display()),
            SourceConfig::Stdin => "stdin".to_string(),
        }
    }
}
