//! Business directory records.
//!
//! A business is either a standalone location, a chain headquarters entity
//! ("chain parent", no physical address), or a physical location linked to a
//! chain parent through `chain_id`. The backend does not enforce that a
//! record holds exactly one of those roles; [`Business::role`] resolves the
//! ambiguity deterministically so downstream code never branches on raw
//! flags.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessStatus::Active => write!(f, "active"),
            BusinessStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl BusinessStatus {
    /// Parse a backend status string. Unrecognized values are treated as
    /// inactive so a bad record can never surface as selectable.
    #[must_use]
    pub fn parse(s: &str) -> BusinessStatus {
        match s {
            "active" => BusinessStatus::Active,
            _ => BusinessStatus::Inactive,
        }
    }
}

/// The single role a business record plays in the chain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessRole {
    Standalone,
    ChainParent,
    ChainLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: Option<String>,
    /// Category code from the category registry (e.g. `"REST"`).
    pub business_type: String,
    pub status: BusinessStatus,
    pub is_chain_parent: bool,
    pub chain_id: Option<String>,
    pub chain_name: Option<String>,
}

impl Business {
    /// Resolve the record's role. `is_chain_parent` wins over a stray
    /// `chain_id` — a headquarters record can never be its own location.
    #[must_use]
    pub fn role(&self) -> BusinessRole {
        if self.is_chain_parent {
            BusinessRole::ChainParent
        } else if self.chain_id.is_some() {
            BusinessRole::ChainLocation
        } else {
            BusinessRole::Standalone
        }
    }

    /// Single-line display address, omitting the empty second line.
    #[must_use]
    pub fn display_address(&self) -> String {
        let mut parts = vec![self.address1.clone()];
        if let Some(a2) = &self.address2 {
            if !a2.trim().is_empty() {
                parts.push(a2.clone());
            }
        }
        parts.push(format!("{}, {} {}", self.city, self.state, self.zip));
        parts.join(", ")
    }
}
