//! Two-phase submission engine
//!
//! Handles the workflow of submitting a document to a journal:
//! 1. Planning - resolve the action and validate the dialog fields
//! 2. Execution - package the document and hand it to the transport

mod execute;
mod plan;
mod progress;

pub use execute::{SubmissionResult, Submitter};
pub use plan::{create_submission_plan, require_enabled, SubmissionPlan};
pub use progress::{NoopProgress, Phase, ProgressCallback};
