//! Merging a location's incentives with its chain's into one resolved view.

use ptk_core::{Business, Incentive, IncentiveDetail, IncentiveType};

/// Where a resolved incentive originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncentiveScope {
    Location,
    ChainWide,
}

impl std::fmt::Display for IncentiveScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncentiveScope::Location => write!(f, "location"),
            IncentiveScope::ChainWide => write!(f, "chain-wide"),
        }
    }
}

/// An incentive tagged with the scope it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIncentive {
    pub scope: IncentiveScope,
    pub incentive: Incentive,
}

/// Merges location and chain incentives into the ordered resolved view.
///
/// For a business with no `chain_id`, the location incentives pass through
/// unchanged (chain input, if any, is ignored). Otherwise all
/// location-scoped entries come first in their original order, followed by
/// all chain-wide entries in theirs. Entries are not collapsed across
/// scopes: a discount recorded both at the location and chain-wide appears
/// twice, matching what the directory has always shown.
#[must_use]
pub fn resolve(
    location: &Business,
    location_incentives: Vec<Incentive>,
    chain_incentives: Vec<Incentive>,
) -> Vec<ResolvedIncentive> {
    let mut resolved: Vec<ResolvedIncentive> = location_incentives
        .into_iter()
        .map(|incentive| ResolvedIncentive {
            scope: IncentiveScope::Location,
            incentive,
        })
        .collect();

    if location.chain_id.is_some() {
        resolved.extend(chain_incentives.into_iter().map(|incentive| ResolvedIncentive {
            scope: IncentiveScope::ChainWide,
            incentive,
        }));
    }

    resolved
}

/// Renders the discount amount: `"10%"` for a percentage, `"$5.00"` for a
/// fixed amount.
#[must_use]
pub fn display_amount(detail: &IncentiveDetail) -> String {
    match detail.discount_type {
        ptk_core::DiscountType::Percentage => format!("{}%", detail.amount.normalize()),
        ptk_core::DiscountType::FixedAmount => format!("${:.2}", detail.amount),
    }
}

/// One-line rendering of an incentive. An unavailable record shows only the
/// fixed indicator; its detail fields are never rendered as empty data.
#[must_use]
pub fn display_line(incentive: &Incentive) -> String {
    match &incentive.detail {
        None => "Not available".to_string(),
        Some(detail) => {
            let kind = match detail.kind {
                IncentiveType::Other => {
                    let description = detail
                        .other_description
                        .as_deref()
                        .unwrap_or("unspecified");
                    format!("Other ({description})")
                }
                k => k.label().to_string(),
            };
            format!("{kind}: {} - {}", display_amount(detail), detail.information)
        }
    }
}

#[cfg(test)]
mod tests {
    use ptk_core::{BusinessStatus, DiscountType};
    use rust_decimal::Decimal;

    use super::*;

    fn business(chain_id: Option<&str>) -> Business {
        Business {
            id: "b1".to_string(),
            name: "Mel's Diner".to_string(),
            address1: "100 Main St".to_string(),
            address2: None,
            city: "Springfield".to_string(),
            state: "MO".to_string(),
            zip: "65801".to_string(),
            phone: None,
            business_type: "REST".to_string(),
            status: BusinessStatus::Active,
            is_chain_parent: false,
            chain_id: chain_id.map(str::to_string),
            chain_name: chain_id.map(|_| "Mel's".to_string()),
        }
    }

    fn incentive(id: &str, kind: IncentiveType, amount: i64) -> Incentive {
        Incentive {
            id: id.to_string(),
            business_id: Some("b1".to_string()),
            is_available: true,
            detail: Some(IncentiveDetail {
                kind,
                other_description: None,
                amount: Decimal::from(amount),
                discount_type: DiscountType::Percentage,
                information: "Show ID".to_string(),
            }),
            created_at: None,
        }
    }

    #[test]
    fn no_chain_passes_location_incentives_through() {
        let loc = vec![
            incentive("i1", IncentiveType::Veteran, 10),
            incentive("i2", IncentiveType::Spouse, 5),
        ];
        let resolved = resolve(&business(None), loc.clone(), Vec::new());
        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(|r| r.scope == IncentiveScope::Location));
        let ids: Vec<&str> = resolved.iter().map(|r| r.incentive.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i2"]);
    }

    #[test]
    fn no_chain_ignores_stray_chain_input() {
        let chain = vec![incentive("c1", IncentiveType::ActiveDuty, 15)];
        let resolved = resolve(&business(None), Vec::new(), chain);
        assert!(resolved.is_empty());
    }

    #[test]
    fn chain_location_entries_precede_chain_wide() {
        let loc = vec![incentive("i1", IncentiveType::Veteran, 10)];
        let chain = vec![incentive("c1", IncentiveType::ActiveDuty, 15)];
        let resolved = resolve(&business(Some("c1")), loc, chain);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].scope, IncentiveScope::Location);
        assert_eq!(
            resolved[0].incentive.detail.as_ref().unwrap().kind,
            IncentiveType::Veteran
        );
        assert_eq!(resolved[1].scope, IncentiveScope::ChainWide);
        assert_eq!(
            resolved[1].incentive.detail.as_ref().unwrap().kind,
            IncentiveType::ActiveDuty
        );
    }

    #[test]
    fn resolved_length_is_sum_of_inputs() {
        let loc = vec![
            incentive("i1", IncentiveType::Veteran, 10),
            incentive("i2", IncentiveType::Spouse, 5),
        ];
        let chain = vec![
            incentive("c1", IncentiveType::ActiveDuty, 15),
            incentive("c2", IncentiveType::FirstResponder, 20),
            incentive("c3", IncentiveType::Veteran, 10),
        ];
        let resolved = resolve(&business(Some("c1")), loc, chain);
        assert_eq!(resolved.len(), 5);
        let scopes: Vec<IncentiveScope> = resolved.iter().map(|r| r.scope).collect();
        assert_eq!(
            scopes,
            vec![
                IncentiveScope::Location,
                IncentiveScope::Location,
                IncentiveScope::ChainWide,
                IncentiveScope::ChainWide,
                IncentiveScope::ChainWide,
            ]
        );
    }

    #[test]
    fn duplicate_across_scopes_appears_twice() {
        let loc = vec![incentive("i1", IncentiveType::Veteran, 10)];
        let chain = vec![incentive("c1", IncentiveType::Veteran, 10)];
        let resolved = resolve(&business(Some("c1")), loc, chain);
        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved[0].incentive.detail,
            resolved[1].incentive.detail,
            "identical discounts are shown at both scopes, not collapsed"
        );
    }

    #[test]
    fn display_amount_percentage_and_fixed() {
        let mut detail = incentive("i1", IncentiveType::Veteran, 10)
            .detail
            .unwrap();
        assert_eq!(display_amount(&detail), "10%");

        detail.discount_type = DiscountType::FixedAmount;
        detail.amount = Decimal::new(550, 2); // 5.50
        assert_eq!(display_amount(&detail), "$5.50");

        detail.amount = Decimal::from(5);
        assert_eq!(display_amount(&detail), "$5.00");
    }

    #[test]
    fn display_line_suppresses_unavailable_detail() {
        let unavailable = Incentive {
            id: "i9".to_string(),
            business_id: Some("b1".to_string()),
            is_available: false,
            detail: None,
            created_at: None,
        };
        assert_eq!(display_line(&unavailable), "Not available");
    }

    #[test]
    fn display_line_names_other_description() {
        let mut i = incentive("i1", IncentiveType::Other, 5);
        i.detail.as_mut().unwrap().other_description = Some("Teachers".to_string());
        let line = display_line(&i);
        assert!(line.starts_with("Other (Teachers)"), "got: {line}");
    }
}
