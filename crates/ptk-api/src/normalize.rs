//! Normalization of directory wire types into domain types.
//!
//! A malformed entry is skipped with a warning rather than failing the
//! whole response; the callers decide what an empty result means.

use chrono::{DateTime, Utc};

use ptk_core::{
    Business, BusinessStatus, DiscountType, Incentive, IncentiveDetail, IncentiveType,
};

use crate::types::{WireBusiness, WireIncentive};

/// Parses a backend timestamp (RFC 3339) into a [`DateTime<Utc>`].
///
/// Returns `None` if the string does not match the expected format.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converts a [`WireBusiness`] into a domain [`Business`].
///
/// A record flagged as a chain parent that also carries a `chain_id` is
/// contradictory; the parent flag wins and the conflict is logged.
#[must_use]
pub fn normalize_business(wire: WireBusiness) -> Business {
    if wire.is_chain && wire.chain_id.is_some() {
        tracing::warn!(
            id = %wire.id,
            name = %wire.bus_name,
            "business record is both chain parent and chain location; treating as parent"
        );
    }

    let status = wire
        .status
        .as_deref()
        .map_or(BusinessStatus::Active, BusinessStatus::parse);

    Business {
        id: wire.id,
        name: wire.bus_name,
        address1: wire.address1,
        address2: wire.address2,
        city: wire.city,
        state: wire.state,
        zip: wire.zip,
        phone: wire.phone,
        business_type: wire.business_type,
        status,
        is_chain_parent: wire.is_chain,
        chain_id: if wire.is_chain { None } else { wire.chain_id },
        chain_name: wire.chain_name,
    }
}

/// Converts a [`WireIncentive`] into a domain [`Incentive`].
///
/// Returns `None` (with a warning) when an available record is missing its
/// type, amount, or discount type — those fields are required for an
/// available incentive to mean anything. Unavailable records drop their
/// detail fields entirely.
#[must_use]
pub fn normalize_incentive(wire: WireIncentive) -> Option<Incentive> {
    let created_at = wire.created_at.as_deref().and_then(parse_timestamp);

    if !wire.is_available {
        return Some(Incentive {
            id: wire.id,
            business_id: wire.business_id,
            is_available: false,
            detail: None,
            created_at,
        });
    }

    let Some(kind) = wire.incentive_type.as_deref().and_then(IncentiveType::parse) else {
        tracing::warn!(
            id = %wire.id,
            code = wire.incentive_type.as_deref().unwrap_or("<missing>"),
            "skipping incentive with unknown type code"
        );
        return None;
    };

    let Some(amount) = wire.amount else {
        tracing::warn!(id = %wire.id, "skipping available incentive without an amount");
        return None;
    };

    let Some(discount_type) = wire.discount_type.as_deref().and_then(DiscountType::parse) else {
        tracing::warn!(
            id = %wire.id,
            value = wire.discount_type.as_deref().unwrap_or("<missing>"),
            "skipping incentive with unknown discount type"
        );
        return None;
    };

    Some(Incentive {
        id: wire.id,
        business_id: wire.business_id,
        is_available: true,
        detail: Some(IncentiveDetail {
            kind,
            other_description: wire.other_description,
            amount,
            discount_type,
            information: wire.information.unwrap_or_default(),
        }),
        created_at,
    })
}
