//! Discount incentive records.
//!
//! An incentive belongs either to a single business location (`business_id`
//! set) or to a chain as a whole (`business_id` absent; the owning chain is
//! implicit in how the record was fetched). When `is_available` is false the
//! kind/amount/information fields carry no meaning; the type system encodes
//! that by keeping them inside [`IncentiveDetail`], present only on
//! available records, so they can never be read as zero or empty data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Eligibility category for a discount, carried on the wire as a two-letter
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncentiveType {
    Veteran,
    ActiveDuty,
    FirstResponder,
    Spouse,
    Other,
}

impl IncentiveType {
    /// Parse a wire code. Returns `None` for codes this client does not know.
    #[must_use]
    pub fn parse(code: &str) -> Option<IncentiveType> {
        match code {
            "VT" => Some(IncentiveType::Veteran),
            "AD" => Some(IncentiveType::ActiveDuty),
            "FR" => Some(IncentiveType::FirstResponder),
            "SP" => Some(IncentiveType::Spouse),
            "OT" => Some(IncentiveType::Other),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            IncentiveType::Veteran => "VT",
            IncentiveType::ActiveDuty => "AD",
            IncentiveType::FirstResponder => "FR",
            IncentiveType::Spouse => "SP",
            IncentiveType::Other => "OT",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            IncentiveType::Veteran => "Veteran",
            IncentiveType::ActiveDuty => "Active Duty",
            IncentiveType::FirstResponder => "First Responder",
            IncentiveType::Spouse => "Spouse",
            IncentiveType::Other => "Other",
        }
    }
}

impl std::fmt::Display for IncentiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

impl DiscountType {
    /// Parse a wire discount-type string. The backend has historically sent
    /// `"percentage"` and `"dollar"`; `"fixed-amount"` is the current form.
    #[must_use]
    pub fn parse(s: &str) -> Option<DiscountType> {
        match s {
            "percentage" => Some(DiscountType::Percentage),
            "fixed-amount" | "dollar" => Some(DiscountType::FixedAmount),
            _ => None,
        }
    }
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::FixedAmount => write!(f, "fixed-amount"),
        }
    }
}

/// The meaningful payload of an available incentive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveDetail {
    pub kind: IncentiveType,
    /// Free-text eligibility description; required when `kind` is `Other`.
    pub other_description: Option<String>,
    pub amount: Decimal,
    pub discount_type: DiscountType,
    pub information: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incentive {
    pub id: String,
    /// Owning location; absent for chain-scoped records.
    pub business_id: Option<String>,
    pub is_available: bool,
    /// Present exactly when `is_available` is true.
    pub detail: Option<IncentiveDetail>,
    pub created_at: Option<DateTime<Utc>>,
}
