/// Configuration loading and defaults
#[allow(clippy::module_inception)]
pub mod config;

pub use config::{ApiConfig, Config, HandlerConfig, OutputConfig, OutputFormat};
