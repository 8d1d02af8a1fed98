pub mod console_output;

pub use console_output::ConsoleOutput;
