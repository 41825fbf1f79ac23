//! The consolidated business-selection and incentive-resolution workflow.
//!
//! One state machine, parameterized by [`WorkflowMode`], replaces the five
//! near-identical page handlers of the original site. All state lives on
//! the [`SelectionWorkflow`] instance; the surrounding surface supplies a
//! [`WorkflowHost`] at construction and receives state-change callbacks and
//! a single notification channel. The workflow knows nothing about how the
//! host renders.

use futures::future::join;

use ptk_api::{ApiError, BusinessClient, BusinessQuery, IncentiveClient};
use ptk_core::{Business, ChainParentSelectPolicy, Incentive, Session};

use crate::error::{FieldError, WorkflowError};
use crate::policy::{can_edit, can_select};
use crate::resolve::{resolve, IncentiveScope, ResolvedIncentive};
use crate::validate::{
    validate_business_form, validate_incentive_draft, BusinessForm, IncentiveDraft,
};

/// Which page family the workflow is driving. Controls which transitions
/// and gates are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowMode {
    /// Read-only incentive viewing.
    View,
    /// Adding a new incentive to the selected business.
    Add,
    /// Updating incentives or the business record itself.
    Update,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkflowConfig {
    pub mode: WorkflowMode,
    pub chain_parent_select: ChainParentSelectPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message. Every error path in the workflow funnels through
/// exactly one of these; nothing is silently swallowed.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Capabilities the surrounding surface provides, resolved at construction.
///
/// The original pages probed `window` for callback functions at call time
/// and silently fell back when one was missing; a missing capability here
/// is a compile error instead.
pub trait WorkflowHost {
    /// A business was selected and its display fields should be populated.
    fn business_selected(&mut self, business: &Business);

    /// The combined incentive view for the selected business is ready.
    fn incentives_resolved(&mut self, business: &Business, incentives: &[ResolvedIncentive]);

    /// An incentive was loaded into the edit form (update mode only).
    fn edit_loaded(&mut self, incentive: &Incentive);

    /// The single user-facing message channel.
    fn notify(&mut self, notice: &Notice);

    /// A network call started or finished; the triggering control should be
    /// disabled while busy to prevent duplicate submissions.
    fn busy_changed(&mut self, busy: bool);
}

/// Workflow phase, carrying the data each phase needs. Search results are
/// carried forward so a viewer can pick another row without re-searching,
/// exactly as the result list stays on the page.
#[derive(Debug, Clone)]
pub enum WorkflowState {
    Idle,
    ResultsShown {
        results: Vec<Business>,
    },
    IncentivesShown {
        results: Vec<Business>,
        business: Business,
        incentives: Vec<ResolvedIncentive>,
    },
    EditingIncentive {
        results: Vec<Business>,
        business: Business,
        incentives: Vec<ResolvedIncentive>,
        editing: Incentive,
    },
}

impl WorkflowState {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::ResultsShown { .. } => "showing search results",
            WorkflowState::IncentivesShown { .. } => "showing incentives",
            WorkflowState::EditingIncentive { .. } => "editing an incentive",
        }
    }
}

pub struct SelectionWorkflow<H> {
    mode: WorkflowMode,
    select_policy: ChainParentSelectPolicy,
    session: Session,
    businesses: BusinessClient,
    incentives: IncentiveClient,
    host: H,
    state: WorkflowState,
    /// Tag for the selection each incentive fetch serves. Bumped on every
    /// selection and reset; a response whose tag no longer matches is
    /// discarded instead of overwriting the current view.
    selection_seq: u64,
}

impl<H: WorkflowHost> SelectionWorkflow<H> {
    pub fn new(
        config: WorkflowConfig,
        session: Session,
        businesses: BusinessClient,
        incentives: IncentiveClient,
        host: H,
    ) -> SelectionWorkflow<H> {
        SelectionWorkflow {
            mode: config.mode,
            select_policy: config.chain_parent_select,
            session,
            businesses,
            incentives,
            host,
            state: WorkflowState::Idle,
            selection_seq: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    #[must_use]
    pub fn mode(&self) -> WorkflowMode {
        self.mode
    }

    /// The host adapter, for callers that own rendering state inside it.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn selected_business(&self) -> Option<&Business> {
        match &self.state {
            WorkflowState::Idle | WorkflowState::ResultsShown { .. } => None,
            WorkflowState::IncentivesShown { business, .. }
            | WorkflowState::EditingIncentive { business, .. } => Some(business),
        }
    }

    /// Runs a business search and shows the results.
    ///
    /// An empty query is a local validation failure and issues no request.
    /// A network failure returns the workflow to `Idle` with a retry
    /// notice. Chain-parent rows are only searchable for admin sessions.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Validation`] or [`WorkflowError::Api`]; both are
    /// also surfaced through the host notification channel.
    pub async fn submit_search(&mut self, query: &BusinessQuery) -> Result<(), WorkflowError> {
        if query.is_empty() {
            let errors = vec![FieldError {
                field: "search",
                message: "enter a business name or an address".to_string(),
            }];
            let err = WorkflowError::Validation(errors);
            self.notify(NoticeLevel::Error, err.to_string());
            return Err(err);
        }

        self.host.busy_changed(true);
        let outcome = self.businesses.search(query, self.session.is_admin()).await;
        self.host.busy_changed(false);

        match outcome {
            Ok(results) => {
                if results.is_empty() {
                    self.notify(NoticeLevel::Info, "no businesses matched your search");
                }
                self.state = WorkflowState::ResultsShown { results };
                Ok(())
            }
            Err(err) => {
                self.state = WorkflowState::Idle;
                self.notify(
                    NoticeLevel::Error,
                    format!("search failed: {err}; please try again"),
                );
                Err(err.into())
            }
        }
    }

    /// Selects a business from the current results, fetches its incentives
    /// (and its chain's, when it belongs to one), and shows the resolved
    /// view.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Forbidden`] when the select policy refuses a chain
    /// parent, [`WorkflowError::InvalidEvent`] when the id is not in the
    /// current results, or [`WorkflowError::Api`] on lookup failure (the
    /// workflow stays on the result list for retry).
    pub async fn select_result(&mut self, business_id: &str) -> Result<(), WorkflowError> {
        let Some(business) = self
            .current_results()
            .and_then(|rs| rs.iter().find(|b| b.id == business_id))
            .cloned()
        else {
            let state = self.state.label();
            self.notify(
                NoticeLevel::Error,
                "that business is not in the current results; search again",
            );
            return Err(WorkflowError::InvalidEvent {
                event: "select business",
                state,
            });
        };

        if !can_select(&self.session, &business, self.select_policy) {
            self.notify(
                NoticeLevel::Warning,
                format!(
                    "'{}' is a chain headquarters record; an administrator account is required to open it",
                    business.name
                ),
            );
            return Err(WorkflowError::Forbidden(format!(
                "chain parent '{}' is restricted",
                business.name
            )));
        }

        self.host.business_selected(&business);
        self.selection_seq += 1;
        let seq = self.selection_seq;

        self.host.busy_changed(true);
        let incentives = &self.incentives;
        let location_fut = lookup_or_empty(incentives.for_business(&business.id));
        let chain_fut = async {
            match business.chain_id.as_deref() {
                Some(chain_id) => lookup_or_empty(incentives.for_chain(chain_id)).await,
                None => Ok(Vec::new()),
            }
        };
        let (location, chain) = join(location_fut, chain_fut).await;
        self.host.busy_changed(false);

        let (location, chain) = match (location, chain) {
            (Ok(l), Ok(c)) => (l, c),
            (Err(err), _) | (_, Err(err)) => {
                self.notify(
                    NoticeLevel::Error,
                    format!("could not load incentives: {err}; please try again"),
                );
                return Err(err.into());
            }
        };

        if seq != self.selection_seq {
            tracing::debug!(business_id, "discarding incentive response for a superseded selection");
            return Ok(());
        }

        let resolved = resolve(&business, location, chain);
        if resolved.is_empty() {
            self.notify(
                NoticeLevel::Info,
                "no incentives on record for this business",
            );
        }

        let results = self
            .current_results()
            .map(<[Business]>::to_vec)
            .unwrap_or_default();
        self.state = WorkflowState::IncentivesShown {
            results,
            business: business.clone(),
            incentives: resolved.clone(),
        };
        self.host.incentives_resolved(&business, &resolved);
        Ok(())
    }

    /// Loads a location-scoped incentive into the edit form. Update mode
    /// only; gated by the edit policy.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidEvent`] outside update mode or without a
    /// resolved view, [`WorkflowError::Forbidden`] when the edit gate or
    /// the incentive's scope refuses.
    pub fn select_incentive_for_edit(&mut self, incentive_id: &str) -> Result<(), WorkflowError> {
        if self.mode != WorkflowMode::Update {
            let state = self.state.label();
            self.notify(NoticeLevel::Error, "editing is not available on this page");
            return Err(WorkflowError::InvalidEvent {
                event: "select incentive for edit",
                state,
            });
        }

        let (results, business, incentives) = match &self.state {
            WorkflowState::IncentivesShown {
                results,
                business,
                incentives,
            }
            | WorkflowState::EditingIncentive {
                results,
                business,
                incentives,
                ..
            } => (results.clone(), business.clone(), incentives.clone()),
            other => {
                let state = other.label();
                self.notify(NoticeLevel::Error, "select a business first");
                return Err(WorkflowError::InvalidEvent {
                    event: "select incentive for edit",
                    state,
                });
            }
        };

        if !can_edit(&self.session, &business) {
            self.notify(
                NoticeLevel::Warning,
                format!(
                    "incentives for '{}' can only be changed by an administrator",
                    business.name
                ),
            );
            return Err(WorkflowError::Forbidden(format!(
                "chain parent '{}' is edit-protected",
                business.name
            )));
        }

        let Some(entry) = incentives.iter().find(|r| r.incentive.id == incentive_id) else {
            self.notify(NoticeLevel::Error, "that incentive is not in the current list");
            return Err(WorkflowError::InvalidEvent {
                event: "select incentive for edit",
                state: self.state.label(),
            });
        };

        if entry.scope == IncentiveScope::ChainWide {
            self.notify(
                NoticeLevel::Warning,
                "chain-wide incentives are managed on the chain record, not on a location",
            );
            return Err(WorkflowError::Forbidden(
                "chain-wide incentives are not editable from a location".to_string(),
            ));
        }

        let editing = entry.incentive.clone();
        self.state = WorkflowState::EditingIncentive {
            results,
            business,
            incentives,
            editing: editing.clone(),
        };
        self.host.edit_loaded(&editing);
        Ok(())
    }

    /// Submits an incentive: created in add mode, updated in update mode.
    ///
    /// Validation failures leave the state (and therefore the form)
    /// untouched and issue no request. Network failures also preserve the
    /// form for resubmission. On success the workflow resets to `Idle`.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Validation`], [`WorkflowError::Forbidden`],
    /// [`WorkflowError::InvalidEvent`], or [`WorkflowError::Api`].
    pub async fn submit_incentive(&mut self, draft: &IncentiveDraft) -> Result<(), WorkflowError> {
        let (business, editing_id) = match (self.mode, &self.state) {
            (WorkflowMode::Add, WorkflowState::IncentivesShown { business, .. }) => {
                (business.clone(), None)
            }
            (
                WorkflowMode::Update,
                WorkflowState::EditingIncentive {
                    business, editing, ..
                },
            ) => (business.clone(), Some(editing.id.clone())),
            (mode, state) => {
                let label = state.label();
                let message = if mode == WorkflowMode::View {
                    "incentives cannot be changed on this page"
                } else {
                    "select a business and incentive first"
                };
                self.notify(NoticeLevel::Error, message);
                return Err(WorkflowError::InvalidEvent {
                    event: "submit incentive",
                    state: label,
                });
            }
        };

        if !can_edit(&self.session, &business) {
            self.notify(
                NoticeLevel::Warning,
                format!(
                    "incentives for '{}' can only be changed by an administrator",
                    business.name
                ),
            );
            return Err(WorkflowError::Forbidden(format!(
                "chain parent '{}' is edit-protected",
                business.name
            )));
        }

        // The workflow owns the selection; the form does not have to repeat it.
        let mut draft = draft.clone();
        if draft.business_id.is_none() {
            draft.business_id = Some(business.id.clone());
        }

        let payload = match validate_incentive_draft(&draft) {
            Ok(payload) => payload,
            Err(errors) => {
                let err = WorkflowError::Validation(errors);
                self.notify(NoticeLevel::Error, err.to_string());
                return Err(err);
            }
        };

        self.host.busy_changed(true);
        let outcome = match editing_id {
            None => self.incentives.create(&payload).await,
            Some(id) => self.incentives.update(&id, &payload).await,
        };
        self.host.busy_changed(false);

        match outcome {
            Ok(_) => {
                self.notify(NoticeLevel::Success, "incentive saved");
                self.reset();
                Ok(())
            }
            Err(err) => {
                self.notify(
                    NoticeLevel::Error,
                    format!("could not save the incentive: {err}; your entries are unchanged"),
                );
                Err(err.into())
            }
        }
    }

    /// Submits an update to the selected business record. Update mode only;
    /// same gate, validation, and failure semantics as incentive
    /// submission.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Validation`], [`WorkflowError::Forbidden`],
    /// [`WorkflowError::InvalidEvent`], or [`WorkflowError::Api`].
    pub async fn submit_business_update(
        &mut self,
        form: &BusinessForm,
    ) -> Result<(), WorkflowError> {
        if self.mode != WorkflowMode::Update {
            let state = self.state.label();
            self.notify(
                NoticeLevel::Error,
                "business details cannot be changed on this page",
            );
            return Err(WorkflowError::InvalidEvent {
                event: "submit business update",
                state,
            });
        }

        let Some(business) = self.selected_business().cloned() else {
            let state = self.state.label();
            self.notify(NoticeLevel::Error, "select a business first");
            return Err(WorkflowError::InvalidEvent {
                event: "submit business update",
                state,
            });
        };

        if !can_edit(&self.session, &business) {
            self.notify(
                NoticeLevel::Warning,
                format!(
                    "'{}' can only be changed by an administrator",
                    business.name
                ),
            );
            return Err(WorkflowError::Forbidden(format!(
                "chain parent '{}' is edit-protected",
                business.name
            )));
        }

        let payload = match validate_business_form(form) {
            Ok(payload) => payload,
            Err(errors) => {
                let err = WorkflowError::Validation(errors);
                self.notify(NoticeLevel::Error, err.to_string());
                return Err(err);
            }
        };

        self.host.busy_changed(true);
        let outcome = self.businesses.update(&business.id, &payload).await;
        self.host.busy_changed(false);

        match outcome {
            Ok(updated) => {
                self.notify(
                    NoticeLevel::Success,
                    format!("'{}' updated", updated.name),
                );
                self.reset();
                Ok(())
            }
            Err(err) => {
                self.notify(
                    NoticeLevel::Error,
                    format!("could not save the business: {err}; your entries are unchanged"),
                );
                Err(err.into())
            }
        }
    }

    /// Clears all selections, result lists, and the edit target. Callable
    /// from any state, any number of times.
    pub fn reset(&mut self) {
        self.selection_seq += 1;
        self.state = WorkflowState::Idle;
    }

    fn current_results(&self) -> Option<&[Business]> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::ResultsShown { results }
            | WorkflowState::IncentivesShown { results, .. }
            | WorkflowState::EditingIncentive { results, .. } => Some(results),
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
        };
        self.host.notify(&notice);
    }
}

/// Treats a not-found lookup as an empty incentive list rather than a
/// failure; a business with no incentive record is an empty state.
async fn lookup_or_empty(
    fut: impl std::future::Future<Output = Result<Vec<Incentive>, ApiError>>,
) -> Result<Vec<Incentive>, ApiError> {
    match fut.await {
        Err(ApiError::NotFound { .. }) => Ok(Vec::new()),
        other => other,
    }
}
