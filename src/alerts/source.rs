use crate::alerts::AlertFeatureCollection;
use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::query::StateCode;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Default National Weather Service active alerts endpoint
pub const NWS_ACTIVE_ALERTS_URL: &str = "https://api.weather.gov/alerts/active";

/// Default User-Agent; the NWS API rejects requests without one
pub const DEFAULT_USER_AGENT: &str = concat!("wxalerts/", env!("CARGO_PKG_VERSION"));

/// Trait for anything that can look up active alerts for a state
pub trait AlertSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        state: &'a StateCode,
    ) -> Pin<Box<dyn Future<Output = Result<AlertFeatureCollection, FetchError>> + Send + 'a>>;
}

/// Alert source backed by the NWS active alerts REST API
///
/// Issues exactly one GET per fetch. There are no retries and, unless a
/// timeout is configured, no deadline on the request.
pub struct NwsAlertSource {
    client: Client,
    base_url: String,
}

impl NwsAlertSource {
    /// Create a source for the public NWS endpoint with default settings
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(NWS_ACTIVE_ALERTS_URL.to_string(), DEFAULT_USER_AGENT, None)
    }

    /// Create a source against a custom endpoint
    ///
    /// # Arguments
    /// * `base_url` - Active alerts endpoint, without query string
    /// * `user_agent` - Value sent in the User-Agent header
    /// * `timeout` - Optional overall request timeout
    ///
    /// # Example
    /// ```
    /// use wxalerts::alerts::NwsAlertSource;
    ///
    /// let source = NwsAlertSource::with_base_url(
    ///     "http://localhost:8080/alerts/active".to_string(),
    ///     "wxalerts-test",
    ///     None,
    /// )
    /// .unwrap();
    /// ```
    pub fn with_base_url(
        base_url: String,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(user_agent).no_proxy();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Create a source from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::with_base_url(
            config.base_url.clone(),
            &config.user_agent,
            config.request_timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for a state, `{base}?area={CODE}`
    pub fn request_url(&self, state: &StateCode) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.base_url, &[("area", state.as_str())]).map_err(|e| {
            FetchError::Other(format!("Invalid alerts URL '{}': {}", self.base_url, e))
        })
    }
}

impl AlertSource for NwsAlertSource {
    fn fetch<'a>(
        &'a self,
        state: &'a StateCode,
    ) -> Pin<Box<dyn Future<Output = Result<AlertFeatureCollection, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.request_url(state)?;
            debug!("Requesting active alerts: {}", url);

            let response = self
                .client
                .get(url)
                .header(ACCEPT, "application/geo+json")
                .send()
                .await?;

            // Non-2xx bodies are never parsed
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Http {
                    status: status.as_u16(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network(format!("Failed to read response: {}", e)))?;

            let collection: AlertFeatureCollection = serde_json::from_slice(&body)?;
            debug!(
                "Decoded {} alert(s) for {}",
                collection.len(),
                state.as_str()
            );

            Ok(collection)
        })
    }
}

/// Mock alert source for testing and development
///
/// The n-th call gets the n-th response, cycling after the last one. Each
/// call can be given its own delay so overlapping fetches resolve out of order.
pub struct MockAlertSource {
    responses: Vec<Result<AlertFeatureCollection, FetchError>>,
    delays: Vec<Duration>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockAlertSource {
    /// Create a mock that always returns the given response
    pub fn with_response(response: Result<AlertFeatureCollection, FetchError>) -> Self {
        Self::with_responses(vec![response])
    }

    /// Create a mock that returns the given responses in order
    pub fn with_responses(responses: Vec<Result<AlertFeatureCollection, FetchError>>) -> Self {
        Self {
            responses,
            delays: Vec::new(),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that reports no active alerts
    pub fn empty() -> Self {
        Self::with_response(Ok(AlertFeatureCollection {
            features: Some(Vec::new()),
        }))
    }

    /// Delay the n-th call by `delays[n]`; calls past the end are not delayed
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }

    /// Number of times fetch() has been called
    pub fn call_count(&self) -> usize {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// State codes passed to fetch(), in call order
    pub fn requested_states(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AlertSource for MockAlertSource {
    fn fetch<'a>(
        &'a self,
        state: &'a StateCode,
    ) -> Pin<Box<dyn Future<Output = Result<AlertFeatureCollection, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let call_index = {
                let mut requested = self
                    .requested
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                requested.push(state.as_str().to_string());
                requested.len() - 1
            };

            if let Some(delay) = self.delays.get(call_index) {
                tokio::time::sleep(*delay).await;
            }

            if self.responses.is_empty() {
                return Err(FetchError::Other("Mock has no responses".to_string()));
            }

            self.responses[call_index % self.responses.len()].clone()
        })
    }
}
