pub mod error;
pub mod policy;
pub mod resolve;
pub mod validate;
pub mod workflow;

pub use error::{FieldError, WorkflowError};
pub use policy::{can_edit, can_select};
pub use resolve::{display_line, resolve, IncentiveScope, ResolvedIncentive};
pub use validate::{validate_business_form, validate_incentive_draft, BusinessForm, IncentiveDraft};
pub use workflow::{
    Notice, NoticeLevel, SelectionWorkflow, WorkflowConfig, WorkflowHost, WorkflowMode,
    WorkflowState,
};
