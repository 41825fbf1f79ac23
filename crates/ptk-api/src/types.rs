//! Directory API wire types.
//!
//! These model the JSON shapes the Patriot Thanks backend actually sends:
//! Mongo-style `_id` fields, `bus_name` instead of `name`, and list
//! envelopes whose entries are kept as raw `serde_json::Value` so one
//! malformed record cannot fail a whole response. Conversion to domain
//! types lives in [`crate::normalize`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Envelope for `operation=search` and `operation=incentives` responses:
/// `{ "results": [ ... ] }`. Entries are parsed individually.
#[derive(Debug, Deserialize)]
pub struct ResultsEnvelope {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// Envelope for single-record responses: `{ "result": { ... } }`.
/// A missing or null `result` means the entity does not exist.
#[derive(Debug, Deserialize)]
pub struct ResultEnvelope {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Envelope for the chains incentive endpoint: `{ "incentives": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct ChainIncentivesEnvelope {
    #[serde(default)]
    pub incentives: Vec<serde_json::Value>,
}

/// Error payload attached to non-2xx responses: `{ "message": ... }`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

/// A business record as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct WireBusiness {
    #[serde(rename = "_id")]
    pub id: String,
    pub bus_name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub business_type: String,
    #[serde(default)]
    pub status: Option<String>,
    /// True only for the chain headquarters record.
    #[serde(default)]
    pub is_chain: bool,
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub chain_name: Option<String>,
}

/// An incentive record as sent by the backend.
///
/// Detail fields are all optional on the wire: an unavailable incentive
/// legitimately omits them, and chain records additionally carry
/// `is_active` marking whether the chain-wide entry is live at all.
#[derive(Debug, Clone, Deserialize)]
pub struct WireIncentive {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub business_id: Option<String>,
    pub is_available: bool,
    #[serde(rename = "type", default)]
    pub incentive_type: Option<String>,
    #[serde(default)]
    pub other_description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub information: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Body for incentive create (POST) and update (PUT) requests.
#[derive(Debug, Clone, Serialize)]
pub struct NewIncentive {
    pub business_id: Option<String>,
    pub is_available: bool,
    #[serde(rename = "type")]
    pub incentive_type: Option<String>,
    pub other_description: Option<String>,
    pub amount: Option<Decimal>,
    pub discount_type: Option<String>,
    pub information: Option<String>,
}

/// Body for business update (PUT) requests.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessUpdate {
    pub bus_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub business_type: String,
    pub status: String,
}
