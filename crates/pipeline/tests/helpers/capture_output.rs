use ferrous_sweep_application::ports::ReportOutput;
use ferrous_sweep_domain::DomainError;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

// ============================================================================
// Capturing ReportOutput
// ============================================================================

#[derive(Clone, Default)]
pub struct CaptureOutput {
    lines: Arc<Mutex<Vec<String>>>,
    status_updates: Arc<Mutex<usize>>,
    finished: Arc<Mutex<bool>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl CaptureOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels `token` once `lines` lines have been printed.
    pub fn cancel_after(mut self, lines: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((lines, token));
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Printed lines that start with `prefix`.
    pub fn lines_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.starts_with(prefix))
            .collect()
    }

    pub fn status_updates(&self) -> usize {
        *self.status_updates.lock().unwrap()
    }

    pub fn finished(&self) -> bool {
        *self.finished.lock().unwrap()
    }
}

impl ReportOutput for CaptureOutput {
    fn print_line(&mut self, line: &str) -> Result<(), DomainError> {
        let mut lines = self.lines.lock().unwrap();
        lines.push(line.to_string());
        if let Some((after, token)) = &self.cancel_after {
            if lines.len() >= *after {
                token.cancel();
            }
        }
        Ok(())
    }

    fn set_status(&mut self, _lines: &[String]) -> Result<(), DomainError> {
        *self.status_updates.lock().unwrap() += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DomainError> {
        *self.finished.lock().unwrap() = true;
        Ok(())
    }
}
