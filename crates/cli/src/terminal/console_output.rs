use console::{style, Term};
use ferrous_sweep_application::ports::ReportOutput;
use ferrous_sweep_domain::DomainError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Terminal with a live status block below the printed lines, plus an
/// optional plain-text copy of every printed line.
pub struct ConsoleOutput {
    term: Term,
    live: bool,
    status: Vec<String>,
    drawn: usize,
    log: Option<BufWriter<File>>,
}

impl ConsoleOutput {
    pub fn new(term: Term) -> Self {
        Self {
            live: term.is_term(),
            term,
            status: Vec::new(),
            drawn: 0,
            log: None,
        }
    }

    /// Copies printed lines to `path`, starting with `command_line`.
    pub fn with_log_file(mut self, path: &Path, command_line: &str) -> Result<Self, DomainError> {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut log = BufWriter::new(file);
        writeln!(log, "{}", command_line).map_err(|e| io_error(path, e))?;
        self.log = Some(log);
        Ok(self)
    }

    fn clear_status(&mut self) -> Result<(), DomainError> {
        if self.drawn > 0 {
            self.term
                .clear_last_lines(self.drawn)
                .map_err(|e| DomainError::IoError(e.to_string()))?;
            self.drawn = 0;
        }
        Ok(())
    }

    fn draw_status(&mut self) -> Result<(), DomainError> {
        if !self.live {
            return Ok(());
        }
        for line in &self.status {
            self.term
                .write_line(&style(line).dim().to_string())
                .map_err(|e| DomainError::IoError(e.to_string()))?;
        }
        self.drawn = self.status.len();
        Ok(())
    }
}

impl ReportOutput for ConsoleOutput {
    fn print_line(&mut self, line: &str) -> Result<(), DomainError> {
        self.clear_status()?;
        self.term
            .write_line(line)
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        if let Some(log) = self.log.as_mut() {
            writeln!(log, "{}", line).map_err(|e| DomainError::IoError(e.to_string()))?;
        }

        self.draw_status()
    }

    fn set_status(&mut self, lines: &[String]) -> Result<(), DomainError> {
        self.clear_status()?;
        self.status = lines.to_vec();
        self.draw_status()
    }

    fn finish(&mut self) -> Result<(), DomainError> {
        self.clear_status()?;
        self.status.clear();
        if let Some(log) = self.log.as_mut() {
            log.flush()
                .map_err(|e| DomainError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for ConsoleOutput {
    fn drop(&mut self) {
        if let Some(log) = self.log.as_mut() {
            let _ = log.flush();
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::IoError(format!("{}: {}", path.display(), e))
}
