pub mod lines;

pub use lines::open_value_source;
