//! Submission lifecycle
//!
//! Version tokens and the decision table that maps a submission record,
//! a workflow role and a local access right to the action a user is offered.

mod resolve;
mod version;

pub use resolve::{resolve_action, DisableReason, ResolvedAction, SubmissionAction};
pub use version::{VersionToken, COPYEDITING_STEP};
