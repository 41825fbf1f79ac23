//! Form validation for incentive and business submissions.
//!
//! Validation runs before any network call and reports every failing field
//! in one pass. On success the draft is converted straight into the wire
//! payload the clients send, so an invalid request can never be built.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use ptk_api::{BusinessUpdate, NewIncentive};
use ptk_core::{DiscountType, IncentiveType};

use crate::error::FieldError;

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern is valid"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("phone pattern is valid"));

/// User input for an incentive create or update.
#[derive(Debug, Clone, Default)]
pub struct IncentiveDraft {
    pub business_id: Option<String>,
    /// Must be an explicit choice, not a default.
    pub is_available: Option<bool>,
    pub kind: Option<IncentiveType>,
    pub other_description: Option<String>,
    pub amount: Option<Decimal>,
    pub discount_type: Option<DiscountType>,
    pub information: Option<String>,
}

/// User input for a business update.
#[derive(Debug, Clone, Default)]
pub struct BusinessForm {
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub business_type: String,
    pub status: String,
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Validates an incentive draft and builds the wire payload.
///
/// # Errors
///
/// Returns every failing field at once. Detail fields are only checked when
/// the incentive is marked available; an unavailable incentive carries none.
pub fn validate_incentive_draft(draft: &IncentiveDraft) -> Result<NewIncentive, Vec<FieldError>> {
    let mut errors = Vec::new();

    let fail = |errors: &mut Vec<FieldError>, field: &'static str, message: &str| {
        errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    };

    if draft.business_id.as_deref().is_none_or(blank) {
        fail(&mut errors, "business_id", "select a business first");
    }

    let Some(is_available) = draft.is_available else {
        fail(
            &mut errors,
            "is_available",
            "choose whether the incentive is currently offered",
        );
        return Err(errors);
    };

    if !is_available {
        if errors.is_empty() {
            return Ok(NewIncentive {
                business_id: draft.business_id.clone(),
                is_available: false,
                incentive_type: None,
                other_description: None,
                amount: None,
                discount_type: None,
                information: None,
            });
        }
        return Err(errors);
    }

    if draft.kind.is_none() {
        fail(&mut errors, "type", "select an incentive type");
    }
    if draft.kind == Some(IncentiveType::Other)
        && draft.other_description.as_deref().is_none_or(blank)
    {
        fail(
            &mut errors,
            "other_description",
            "describe who qualifies for an 'Other' incentive",
        );
    }
    match draft.amount {
        None => fail(&mut errors, "amount", "enter a discount amount"),
        Some(a) if a < Decimal::ZERO => {
            fail(&mut errors, "amount", "amount must not be negative");
        }
        Some(_) => {}
    }
    if draft.discount_type.is_none() {
        fail(
            &mut errors,
            "discount_type",
            "choose a percentage or fixed-amount discount",
        );
    }
    if draft.information.as_deref().is_none_or(blank) {
        fail(
            &mut errors,
            "information",
            "describe how to claim the incentive",
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewIncentive {
        business_id: draft.business_id.clone(),
        is_available: true,
        incentive_type: draft.kind.map(|k| k.code().to_string()),
        other_description: draft.other_description.clone(),
        amount: draft.amount,
        discount_type: draft.discount_type.map(|d| d.to_string()),
        information: draft.information.clone(),
    })
}

/// Validates a business update form and builds the wire payload.
///
/// # Errors
///
/// Returns every failing field at once.
pub fn validate_business_form(form: &BusinessForm) -> Result<BusinessUpdate, Vec<FieldError>> {
    let mut errors = Vec::new();

    let require = |errors: &mut Vec<FieldError>, field: &'static str, value: &str| {
        if blank(value) {
            errors.push(FieldError {
                field,
                message: "must not be empty".to_string(),
            });
        }
    };

    require(&mut errors, "name", &form.name);
    require(&mut errors, "address1", &form.address1);
    require(&mut errors, "city", &form.city);
    require(&mut errors, "state", &form.state);
    require(&mut errors, "type", &form.business_type);
    require(&mut errors, "status", &form.status);

    if !ZIP_RE.is_match(form.zip.trim()) {
        errors.push(FieldError {
            field: "zip",
            message: "must match 12345 or 12345-6789".to_string(),
        });
    }
    if !PHONE_RE.is_match(form.phone.trim()) {
        errors.push(FieldError {
            field: "phone",
            message: "must match 555-555-5555".to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(BusinessUpdate {
        bus_name: form.name.trim().to_string(),
        address1: form.address1.trim().to_string(),
        address2: form
            .address2
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        city: form.city.trim().to_string(),
        state: form.state.trim().to_string(),
        zip: form.zip.trim().to_string(),
        phone: Some(form.phone.trim().to_string()),
        business_type: form.business_type.trim().to_string(),
        status: form.status.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> IncentiveDraft {
        IncentiveDraft {
            business_id: Some("b1".to_string()),
            is_available: Some(true),
            kind: Some(IncentiveType::Veteran),
            other_description: None,
            amount: Some(Decimal::from(10)),
            discount_type: Some(DiscountType::Percentage),
            information: Some("Show military ID".to_string()),
        }
    }

    fn valid_form() -> BusinessForm {
        BusinessForm {
            name: "Mel's Diner".to_string(),
            address1: "100 Main St".to_string(),
            address2: None,
            city: "Springfield".to_string(),
            state: "MO".to_string(),
            zip: "65801".to_string(),
            phone: "417-555-0100".to_string(),
            business_type: "REST".to_string(),
            status: "active".to_string(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_incentive_draft_builds_payload() {
        let payload = validate_incentive_draft(&valid_draft()).expect("valid");
        assert_eq!(payload.incentive_type.as_deref(), Some("VT"));
        assert_eq!(payload.discount_type.as_deref(), Some("percentage"));
        assert!(payload.is_available);
    }

    #[test]
    fn missing_availability_choice_is_reported() {
        let draft = IncentiveDraft {
            is_available: None,
            ..valid_draft()
        };
        let errors = validate_incentive_draft(&draft).unwrap_err();
        assert!(fields(&errors).contains(&"is_available"));
    }

    #[test]
    fn unavailable_incentive_needs_no_detail() {
        let draft = IncentiveDraft {
            business_id: Some("b1".to_string()),
            is_available: Some(false),
            ..IncentiveDraft::default()
        };
        let payload = validate_incentive_draft(&draft).expect("valid");
        assert!(!payload.is_available);
        assert!(payload.incentive_type.is_none());
        assert!(payload.amount.is_none());
    }

    #[test]
    fn other_kind_requires_description() {
        let draft = IncentiveDraft {
            kind: Some(IncentiveType::Other),
            other_description: Some("  ".to_string()),
            ..valid_draft()
        };
        let errors = validate_incentive_draft(&draft).unwrap_err();
        assert_eq!(fields(&errors), vec!["other_description"]);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let draft = IncentiveDraft {
            amount: Some(Decimal::from(-5)),
            ..valid_draft()
        };
        let errors = validate_incentive_draft(&draft).unwrap_err();
        assert_eq!(fields(&errors), vec!["amount"]);
    }

    #[test]
    fn every_failing_field_reported_at_once() {
        let draft = IncentiveDraft {
            business_id: None,
            is_available: Some(true),
            kind: None,
            other_description: None,
            amount: None,
            discount_type: None,
            information: None,
        };
        let errors = validate_incentive_draft(&draft).unwrap_err();
        let names = fields(&errors);
        for expected in ["business_id", "type", "amount", "discount_type", "information"] {
            assert!(names.contains(&expected), "missing {expected}: {names:?}");
        }
    }

    #[test]
    fn valid_business_form_builds_payload() {
        let payload = validate_business_form(&valid_form()).expect("valid");
        assert_eq!(payload.bus_name, "Mel's Diner");
        assert_eq!(payload.zip, "65801");
    }

    #[test]
    fn short_zip_is_rejected() {
        let form = BusinessForm {
            zip: "1234".to_string(),
            ..valid_form()
        };
        let errors = validate_business_form(&form).unwrap_err();
        assert_eq!(fields(&errors), vec!["zip"]);
    }

    #[test]
    fn extended_zip_is_accepted() {
        let form = BusinessForm {
            zip: "12345-6789".to_string(),
            ..valid_form()
        };
        assert!(validate_business_form(&form).is_ok());
    }

    #[test]
    fn malformed_phone_is_rejected() {
        for bad in ["4175550100", "417-555-010", "(417) 555-0100", ""] {
            let form = BusinessForm {
                phone: bad.to_string(),
                ..valid_form()
            };
            let errors = validate_business_form(&form).unwrap_err();
            assert!(fields(&errors).contains(&"phone"), "phone '{bad}' passed");
        }
    }

    #[test]
    fn business_form_aggregates_failures() {
        let form = BusinessForm {
            name: String::new(),
            city: " ".to_string(),
            zip: "abc".to_string(),
            ..valid_form()
        };
        let errors = validate_business_form(&form).unwrap_err();
        let names = fields(&errors);
        for expected in ["name", "city", "zip"] {
            assert!(names.contains(&expected), "missing {expected}: {names:?}");
        }
    }

    #[test]
    fn blank_address2_is_dropped_from_payload() {
        let form = BusinessForm {
            address2: Some("   ".to_string()),
            ..valid_form()
        };
        let payload = validate_business_form(&form).expect("valid");
        assert!(payload.address2.is_none());
    }
}
