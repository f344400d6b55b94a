/// Error types for fetching, validation and configuration
pub mod error;

/// State code parsing
pub mod query;

/// Alert response model and alert sources
pub mod alerts;

/// Display region, input field and node rendering
pub mod display;

/// Alert collection and error rendering into display nodes
pub mod render;

/// Fetch-and-render handler
pub mod handler;

/// Configuration management
pub mod config;

// Re-export commonly used types
pub use error::{ConfigError, ErrorKind, FetchError, InvalidStateCode};
pub use handler::{AlertHandler, TriggerOutcome};
pub use query::StateCode;
