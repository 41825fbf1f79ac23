use ptk_api::ApiError;
use thiserror::Error;

/// A single failing field from a form validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors surfaced at the workflow boundary. None are fatal: every failure
/// leaves the workflow in a well-defined prior state.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Local, recoverable; the caller must correct input. Carries every
    /// failing field at once, never one at a time.
    #[error("validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// A role gate refused the action.
    #[error("not permitted: {0}")]
    Forbidden(String),

    /// The event is not meaningful in the workflow's current state.
    #[error("'{event}' is not valid while {state}")]
    InvalidEvent {
        event: &'static str,
        state: &'static str,
    },

    /// A client call failed; see [`ApiError`] for the taxonomy.
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
