//! Location- and chain-scoped incentive endpoints.

use reqwest::Method;

use ptk_core::Incentive;

use crate::client::{ClientConfig, Transport};
use crate::error::ApiError;
use crate::normalize::normalize_incentive;
use crate::retry::retry_with_backoff;
use crate::types::{ChainIncentivesEnvelope, NewIncentive, ResultEnvelope, ResultsEnvelope, WireIncentive};

/// Client for incentive records.
pub struct IncentiveClient {
    transport: Transport,
}

impl IncentiveClient {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if the base URL does
    /// not parse.
    pub fn new(config: &ClientConfig) -> Result<IncentiveClient, ApiError> {
        Ok(IncentiveClient {
            transport: Transport::new(config)?,
        })
    }

    /// Fetches the incentives recorded against a single business location.
    ///
    /// An empty list is a valid success — the business simply has no
    /// incentives on record.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on transport or
    ///   HTTP failure (transient failures retried).
    /// - [`ApiError::Deserialize`] if the envelope does not match.
    pub async fn for_business(&self, business_id: &str) -> Result<Vec<Incentive>, ApiError> {
        let url = self.transport.endpoint(
            "combined-api",
            &[("operation", "incentives"), ("business_id", business_id)],
        )?;

        let context = format!("incentives for business {business_id}");
        let body = retry_with_backoff(
            self.transport.max_retries,
            self.transport.backoff_base_ms,
            || self.transport.get_json(&url, &context),
        )
        .await?;

        let envelope: ResultsEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        Ok(Self::collect(envelope.results))
    }

    /// Fetches the chain-wide incentives for a chain, keeping only entries
    /// the chain has marked active.
    ///
    /// # Errors
    ///
    /// Same as [`IncentiveClient::for_business`].
    pub async fn for_chain(&self, chain_id: &str) -> Result<Vec<Incentive>, ApiError> {
        let url = self.transport.endpoint(
            "chains",
            &[("operation", "incentives"), ("chain_id", chain_id)],
        )?;

        let context = format!("incentives for chain {chain_id}");
        let body = retry_with_backoff(
            self.transport.max_retries,
            self.transport.backoff_base_ms,
            || self.transport.get_json(&url, &context),
        )
        .await?;

        let envelope: ChainIncentivesEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        // A record without the flag is a plain incentive shape; only an
        // explicit false filters it out.
        let active: Vec<serde_json::Value> = envelope
            .incentives
            .into_iter()
            .filter(|v| {
                v.get("is_active")
                    .and_then(serde_json::Value::as_bool)
                    .unwrap_or(true)
            })
            .collect();

        Ok(Self::collect(active))
    }

    /// Creates a new incentive. Requires the bearer token; mutations are
    /// never retried.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] when the token is missing or refused.
    /// - [`ApiError::Api`] when the backend rejects the record with a
    ///   `{"message"}` payload.
    pub async fn create(&self, incentive: &NewIncentive) -> Result<Incentive, ApiError> {
        let url = self.transport.endpoint("incentives", &[])?;
        let context = "incentive create".to_string();
        let body = self
            .transport
            .send_json(Method::POST, &url, incentive, &context)
            .await?;
        Self::mutated_record(body, &context)
    }

    /// Updates an existing incentive. Requires the bearer token; mutations
    /// are never retried.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] when the token is missing or refused.
    /// - [`ApiError::NotFound`] when the backend reports no match.
    /// - [`ApiError::Api`] when the backend rejects the record with a
    ///   `{"message"}` payload.
    pub async fn update(&self, id: &str, incentive: &NewIncentive) -> Result<Incentive, ApiError> {
        let url = self.transport.endpoint(&format!("incentives/{id}"), &[])?;
        let context = format!("incentive {id}");
        let body = self
            .transport
            .send_json(Method::PUT, &url, incentive, &context)
            .await?;
        Self::mutated_record(body, &context)
    }

    fn collect(entries: Vec<serde_json::Value>) -> Vec<Incentive> {
        entries
            .into_iter()
            .filter_map(|v| {
                serde_json::from_value::<WireIncentive>(v)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "skipping malformed incentive entry");
                    })
                    .ok()
            })
            .filter_map(normalize_incentive)
            .collect()
    }

    fn mutated_record(body: serde_json::Value, context: &str) -> Result<Incentive, ApiError> {
        let envelope: ResultEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        let Some(value) = envelope.result else {
            return Err(ApiError::NotFound {
                what: context.to_string(),
            });
        };

        let wire: WireIncentive =
            serde_json::from_value(value).map_err(|e| ApiError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        normalize_incentive(wire)
            .ok_or_else(|| ApiError::Api(format!("{context}: backend returned a malformed record")))
    }
}
