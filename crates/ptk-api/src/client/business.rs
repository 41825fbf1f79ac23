//! Business search, detail, and update endpoints.

use reqwest::Method;

use ptk_core::Business;

use crate::client::{ClientConfig, Transport};
use crate::error::ApiError;
use crate::normalize::normalize_business;
use crate::retry::retry_with_backoff;
use crate::types::{BusinessUpdate, ResultEnvelope, ResultsEnvelope, WireBusiness};

/// Search terms for the business directory. At least one field must be
/// non-blank.
#[derive(Debug, Clone, Default)]
pub struct BusinessQuery {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl BusinessQuery {
    #[must_use]
    pub fn by_name(name: &str) -> BusinessQuery {
        BusinessQuery {
            name: Some(name.to_string()),
            address: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().is_none_or(|v| v.trim().is_empty());
        blank(&self.name) && blank(&self.address)
    }
}

/// Client for business records.
pub struct BusinessClient {
    transport: Transport,
}

impl BusinessClient {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if the base URL does
    /// not parse.
    pub fn new(config: &ClientConfig) -> Result<BusinessClient, ApiError> {
        Ok(BusinessClient {
            transport: Transport::new(config)?,
        })
    }

    /// Searches businesses by name and/or address.
    ///
    /// Chain-parent rows are excluded from the results unless
    /// `include_chain_parents` is set — only admin chain-management views
    /// show headquarters records as selectable rows.
    ///
    /// # Errors
    ///
    /// - [`ApiError::EmptyQuery`] when both terms are blank; no request is
    ///   issued.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on transport or
    ///   HTTP failure (transient failures retried).
    /// - [`ApiError::Deserialize`] if the envelope does not match.
    pub async fn search(
        &self,
        query: &BusinessQuery,
        include_chain_parents: bool,
    ) -> Result<Vec<Business>, ApiError> {
        if query.is_empty() {
            return Err(ApiError::EmptyQuery);
        }

        let name = query.name.as_deref().unwrap_or("");
        let address = query.address.as_deref().unwrap_or("");
        let url = self.transport.endpoint(
            "business",
            &[
                ("operation", "search"),
                ("business_name", name),
                ("address", address),
            ],
        )?;

        let context = format!("search(name={name}, address={address})");
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

        let businesses = envelope
            .results
            .into_iter()
            .filter_map(|v| {
                serde_json::from_value::<WireBusiness>(v)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "search: skipping malformed business entry");
                    })
                    .ok()
            })
            .map(normalize_business)
            .filter(|b| include_chain_parents || !b.is_chain_parent)
            .collect();

        Ok(businesses)
    }

    /// Fetches a single business by id.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] when the backend reports no match.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on transport or
    ///   HTTP failure (transient failures retried).
    /// - [`ApiError::Deserialize`] if the record does not match the expected
    ///   shape.
    pub async fn get(&self, id: &str) -> Result<Business, ApiError> {
        let url = self
            .transport
            .endpoint("business", &[("operation", "get"), ("id", id)])?;

        let context = format!("business {id}");
        let body = retry_with_backoff(
            self.transport.max_retries,
            self.transport.backoff_base_ms,
            || self.transport.get_json(&url, &context),
        )
        .await?;

        let envelope: ResultEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let Some(value) = envelope.result else {
            return Err(ApiError::NotFound { what: context });
        };

        let wire: WireBusiness =
            serde_json::from_value(value).map_err(|e| ApiError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        Ok(normalize_business(wire))
    }

    /// Updates a business record. Requires the bearer token; mutations are
    /// never retried.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] when the token is missing or refused.
    /// - [`ApiError::NotFound`] when the backend reports no match.
    /// - [`ApiError::Api`] when the backend rejects the update with a
    ///   `{"message"}` payload.
    pub async fn update(&self, id: &str, update: &BusinessUpdate) -> Result<Business, ApiError> {
        let url = self.transport.endpoint(&format!("business/{id}"), &[])?;

        let context = format!("business {id}");
        let body = self
            .transport
            .send_json(Method::PUT, &url, update, &context)
            .await?;

        let envelope: ResultEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let Some(value) = envelope.result else {
            return Err(ApiError::NotFound { what: context });
        };

        let wire: WireBusiness =
            serde_json::from_value(value).map_err(|e| ApiError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        Ok(normalize_business(wire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_detection() {
        assert!(BusinessQuery::default().is_empty());
        assert!(BusinessQuery {
            name: Some("  ".to_string()),
            address: Some(String::new()),
        }
        .is_empty());
        assert!(!BusinessQuery::by_name("Diner").is_empty());
        assert!(!BusinessQuery {
            name: None,
            address: Some("Main St".to_string()),
        }
        .is_empty());
    }
}
