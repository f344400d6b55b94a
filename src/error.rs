use thiserror::Error;

/// Errors that can occur while fetching and decoding alerts
///
/// Each variant is assigned where the failure happens, so the handler never
/// has to guess the cause from message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },

    #[error("Failed to decode alerts: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

/// User-facing failure categories shown in the display region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The weather service could not be reached
    NetworkFailure,
    /// A response arrived with a non-2xx status
    HttpFailure,
    /// Anything else, including undecodable bodies
    UnexpectedFailure,
}

impl FetchError {
    /// Map this error onto one of the three user-facing categories
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_) => ErrorKind::NetworkFailure,
            FetchError::Http { .. } => ErrorKind::HttpFailure,
            FetchError::Decode(_) | FetchError::Other(_) => ErrorKind::UnexpectedFailure,
        }
    }

    /// Build the message displayed to the user for this error
    ///
    /// # Arguments
    ///
    /// * `state_code` - The state code the failed query was issued for
    pub fn user_message(&self, state_code: &str) -> String {
        match self.kind() {
            ErrorKind::NetworkFailure => "Network error: Unable to connect to the weather service. \
                 Please check your internet connection."
                .to_string(),
            ErrorKind::HttpFailure => format!(
                "Error: Unable to fetch weather data for {}. The server may be unavailable \
                 or the state abbreviation may be incorrect.",
                state_code
            ),
            ErrorKind::UnexpectedFailure => {
                format!("Unexpected error: {}. Please try again later.", self)
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        // Status codes are checked on the response itself, so only
        // transport, decode and builder failures arrive here
        if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else if error.is_connect() || error.is_timeout() || error.is_request() {
            FetchError::Network(error.to_string())
        } else if error.is_builder() {
            FetchError::Other(format!("Invalid request: {}", error))
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode(error.to_string())
    }
}

/// The two-letter state code check failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please enter a two-letter state abbreviation.")]
pub struct InvalidStateCode {
    /// The normalized (trimmed, uppercased) input that was rejected
    pub input: String,
}

/// Errors that can occur during configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}
