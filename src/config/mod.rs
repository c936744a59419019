//! Crawl configuration
//!
//! The configuration is assembled by the CLI layer (flags with env-var
//! defaults) and validated here before any crawl starts. It is immutable for
//! the lifetime of a run and serializable because the parallel mode ships it
//! to worker processes as JSON.

mod domains;
mod types;
mod validation;

pub use domains::load_domains;
pub use types::CrawlConfig;
pub use validation::validate;
