use ferrous_sweep_domain::RangeFormat;
use tokio::io::AsyncBufRead;

pub type LineReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// An opened source of values, consumed once by the producer.
pub enum ValueSource {
    Range {
        first: u64,
        last: u64,
        format: RangeFormat,
    },
    /// One value per line.
    Lines(LineReader),
}

impl ValueSource {
    pub fn lines(reader: impl tokio::io::AsyncBufRead + Send + Unpin + 'static) -> Self {
        ValueSource::Lines(Box::new(reader))
    }
}

impl std::fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Range {
                first,
                last,
                format,
            } => f
                .debug_struct("Range")
                .field("first", first)
                .field("last", last)
                .field("format", &format.as_str())
                .finish(),
            ValueSource::Lines(_) => f.write_str("Lines"),
        }
    }
}
