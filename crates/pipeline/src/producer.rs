use crate::errors::PipelineError;
use ferrous_sweep_application::ports::{LineReader, ValueSource};
use ferrous_sweep_domain::RangeFormat;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// First stage: emits values and, once known, how many there are.
pub struct ValueProducer {
    source: ValueSource,
    shutdown: CancellationToken,
}

impl ValueProducer {
    pub fn new(source: ValueSource) -> Self {
        Self {
            source,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Runs until the source is exhausted, cancellation, or the consumer
    /// going away. Both channels are closed on return.
    pub async fn run(self, values: Sender<String>, count: Sender<u64>) -> Result<(), PipelineError> {
        match self.source {
            ValueSource::Range {
                first,
                last,
                format,
            } => {
                produce_range(first, last, &format, &values, &count, &self.shutdown).await;
                Ok(())
            }
            ValueSource::Lines(reader) => {
                produce_lines(reader, &values, &count, &self.shutdown).await
            }
        }
    }
}

async fn produce_range(
    first: u64,
    last: u64,
    format: &RangeFormat,
    values: &Sender<String>,
    count: &Sender<u64>,
    shutdown: &CancellationToken,
) {
    let total = (last - first).saturating_add(1);
    offer_count(count, total);
    info!(first, last, total, "Producing range");

    let mut sent = 0u64;
    for i in first..=last {
        if !send_value(values, format.format(i), shutdown).await {
            break;
        }
        sent += 1;
    }

    debug!(sent, "Range producer finished");
}

async fn produce_lines(
    mut reader: LineReader,
    values: &Sender<String>,
    count: &Sender<u64>,
    shutdown: &CancellationToken,
) -> Result<(), PipelineError> {
    let mut buf = Vec::new();
    let mut read = 0u64;

    let outcome = loop {
        buf.clear();
        // A downstream limit may close the channel while the source is idle.
        let filled = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break Ok(()),
            _ = values.closed() => {
                debug!(read, "Consumer gone, stopping line producer");
                break Ok(());
            }
            filled = reader.read_until(b'\n', &mut buf) => filled,
        };

        match filled {
            Ok(0) => break Ok(()),
            Ok(_) => {
                read += 1;
                if !send_value(values, decode_line(&buf), shutdown).await {
                    break Ok(());
                }
            }
            Err(e) => break Err(PipelineError::Source(e.to_string())),
        }
    };

    offer_count(count, read);
    info!(read, "Line producer finished");
    outcome
}

/// Strips the line terminator; invalid UTF-8 is replaced, not rejected.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Sends one value unless cancelled. Returns false when the stage should
/// stop, either on cancellation or because nobody reads anymore.
pub(crate) async fn send_value<T>(
    out: &Sender<T>,
    value: T,
    shutdown: &CancellationToken,
) -> bool {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => false,
        sent = out.send(value) => sent.is_ok(),
    }
}

/// Receives one value unless cancelled.
pub(crate) async fn recv_value<T>(
    input: &mut Receiver<T>,
    shutdown: &CancellationToken,
) -> Option<T> {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => None,
        value = input.recv() => value,
    }
}

/// The count travels at most once per channel, so the capacity-1 slot is
/// always free and this never blocks.
pub(crate) fn offer_count(count: &Sender<u64>, total: u64) {
    if count.try_send(total).is_err() {
        debug!(total, "Count receiver gone, dropping count");
    }
}
