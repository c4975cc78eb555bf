//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! USER_AGENT, timeout and auth configuration.

use crate::config::network::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::data::Settings;
use crate::error::{AppError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client construction options
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Value for the `Accept` header
    pub accept: Option<&'static str>,
    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            accept: None,
            token: None,
        }
    }
}

impl ClientOptions {
    /// Options taken from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            accept: None,
            token: settings.effective_token(),
        }
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }
}

/// Shared HTTP client with standard configuration
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a client with explicit options
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(accept) = options.accept {
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }
        if let Some(token) = &options.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| AppError::Config("Token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .build()?;
        Ok(Self { inner })
    }

    /// GET a URL and deserialize the JSON response
    ///
    /// A 404 becomes `NotFound`; any other non-success status is a
    /// network error.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.inner.get(url).send()?;
        debug!(%url, status = %resp.status(), "GET");

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(url.to_string()));
        }

        let data = resp.error_for_status()?.json::<T>()?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::with_options(ClientOptions::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_token_and_accept() {
        let options = ClientOptions {
            token: Some("abc123".to_string()),
            ..ClientOptions::default()
        }
        .with_accept("application/json");
        assert!(HttpClient::with_options(options).is_ok());
    }

    #[test]
    fn test_client_rejects_bad_token() {
        let options = ClientOptions {
            token: Some("line\nbreak".to_string()),
            ..ClientOptions::default()
        };
        assert!(matches!(
            HttpClient::with_options(options),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_options_from_settings() {
        let mut settings = Settings::new();
        settings.connect_timeout_secs = 3;
        settings.request_timeout_secs = 7;
        settings.token = Some("t".to_string());

        let options = ClientOptions::from_settings(&settings);
        assert_eq!(options.connect_timeout, Duration::from_secs(3));
        assert_eq!(options.request_timeout, Duration::from_secs(7));
        assert_eq!(options.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_get_json_invalid_url() {
        let client = HttpClient::with_options(ClientOptions::default()).unwrap();
        let result: Result<serde_json::Value> = client.get_json("http://invalid.invalid.invalid");
        assert!(result.is_err());
    }
}
