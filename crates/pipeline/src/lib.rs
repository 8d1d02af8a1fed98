//! Concurrent sweep pipeline: values in, classified results out.
pub mod errors;
pub mod marker;
pub mod producer;
pub mod rate_limit;
pub mod recorder;
pub mod reporter;
pub mod resolver_pool;
pub mod runner;
pub mod volume;

pub use errors::PipelineError;
pub use marker::ClassificationStage;
pub use producer::ValueProducer;
pub use rate_limit::RateLimiter;
pub use recorder::Recorder;
pub use reporter::{format_duration, ReportSummary, Reporter, Stats};
pub use resolver_pool::ResolverPool;
pub use runner::{Pipeline, RunSummary};
pub use volume::{LimitFilter, SkipFilter};
