//! HTTP clients for the Patriot Thanks directory REST API.
//!
//! [`BusinessClient`] covers search/detail/update of business records;
//! [`IncentiveClient`] covers location- and chain-scoped incentive lookups
//! and incentive mutations. Both share a [`Transport`] that owns the
//! `reqwest` client, base URL, bearer token, and retry policy. Use
//! [`ClientConfig::new`] to point at a mock server in tests.

mod business;
mod incentives;

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;

use crate::error::ApiError;
use crate::types::ErrorEnvelope;

pub use business::{BusinessClient, BusinessQuery};
pub use incentives::IncentiveClient;

/// Connection settings shared by both clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub auth_token: Option<String>,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl ClientConfig {
    /// Config with production defaults against the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 30,
            user_agent: "patriot-thanks/0.1 (directory-client)".to_string(),
            auth_token: None,
            max_retries: 3,
            backoff_base_ms: 500,
        }
    }

    /// Derive connection settings from the application configuration.
    #[must_use]
    pub fn from_app_config(config: &ptk_core::AppConfig) -> ClientConfig {
        ClientConfig {
            base_url: config.api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            auth_token: config.auth_token.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: &str) -> ClientConfig {
        self.auth_token = Some(token.to_string());
        self
    }
}

/// Shared request core: HTTP client, base URL, token, retry policy.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Transport, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join appends path
        // segments instead of replacing the last one.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Transport {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Builds a request URL from a relative path and query parameters.
    pub(crate) fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body as JSON.
    pub(crate) async fn get_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::handle_response(response, url, context).await
    }

    /// Sends a mutation (POST/PUT) with a JSON body and the bearer token,
    /// and parses the response body as JSON.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &Url,
        body: &B,
        context: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let mut request = self.client.request(method, url.clone()).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::handle_response(response, url, context).await
    }

    /// Maps the response status to the error taxonomy and parses the body.
    ///
    /// - 404 → [`ApiError::NotFound`] with the caller's context.
    /// - 401/403 → [`ApiError::Unauthorized`] carrying the server's
    ///   `{"message"}` when present.
    /// - Other 4xx → [`ApiError::Api`] when a `{"message"}` payload is
    ///   attached, [`ApiError::UnexpectedStatus`] otherwise.
    /// - 5xx → [`ApiError::UnexpectedStatus`] (retriable).
    async fn handle_response(
        response: reqwest::Response,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                what: context.to_string(),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = Self::error_message(response)
                .await
                .unwrap_or_else(|| "authorization required".to_string());
            return Err(ApiError::Unauthorized { message });
        }

        if status.is_client_error() {
            if let Some(message) = Self::error_message(response).await {
                return Err(ApiError::Api(message));
            }
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    async fn error_message(response: reqwest::Response) -> Option<String> {
        let body = response.text().await.ok()?;
        serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|e| e.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> Transport {
        Transport::new(&ClientConfig::new(base)).expect("transport construction should not fail")
    }

    #[test]
    fn endpoint_appends_path_and_params() {
        let t = transport("https://api.patriotthanks.test");
        let url = t
            .endpoint("business", &[("operation", "search"), ("business_name", "Diner")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.patriotthanks.test/business?operation=search&business_name=Diner"
        );
    }

    #[test]
    fn endpoint_preserves_base_path_segment() {
        let t = transport("https://host.test/api/");
        let url = t.endpoint("chains", &[("operation", "incentives")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://host.test/api/chains?operation=incentives"
        );
    }

    #[test]
    fn endpoint_encodes_query_values() {
        let t = transport("https://api.patriotthanks.test");
        let url = t
            .endpoint("business", &[("business_name", "Mel's Diner & Grill")])
            .unwrap();
        assert!(
            url.as_str().contains("Mel%27s+Diner+%26+Grill")
                || url.as_str().contains("Mel's+Diner+%26+Grill"),
            "query param should be encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Transport::new(&ClientConfig::new("not a url"));
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
    }
}
