use ferrous_sweep_domain::DomainError;

/// Terminal the reporter writes to.
pub trait ReportOutput: Send {
    /// Prints one permanent line above the status block.
    fn print_line(&mut self, line: &str) -> Result<(), DomainError>;

    /// Replaces the live status block.
    fn set_status(&mut self, lines: &[String]) -> Result<(), DomainError>;

    /// Removes the status block; called once after the last line.
    fn finish(&mut self) -> Result<(), DomainError>;
}
