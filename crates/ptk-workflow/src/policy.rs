//! Role gates for selection and mutation.
//!
//! The one rule the whole system hangs on: chain headquarters records are
//! protected from non-admin mutation. It is applied identically to
//! incentive-add, incentive-update, and business-update. Whether a
//! non-admin may *select* a chain parent in read-only contexts is a
//! deployment policy, not a rule.

use ptk_core::{Business, ChainParentSelectPolicy, Session};

/// May the viewer mutate this business (or its incentives)?
///
/// False exactly when the record is a chain parent and the viewer is not an
/// admin; true in every other combination.
#[must_use]
pub fn can_edit(session: &Session, business: &Business) -> bool {
    session.is_admin() || !business.is_chain_parent
}

/// May the viewer select this business at all?
///
/// Under [`ChainParentSelectPolicy::Allow`] selection is always permitted —
/// only mutation is gated. Under `Block`, non-admins cannot select chain
/// parents even to view.
#[must_use]
pub fn can_select(
    session: &Session,
    business: &Business,
    policy: ChainParentSelectPolicy,
) -> bool {
    match policy {
        ChainParentSelectPolicy::Allow => true,
        ChainParentSelectPolicy::Block => can_edit(session, business),
    }
}
