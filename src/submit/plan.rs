//! Phase 1: Submission planning
//!
//! Decides what a submit attempt will do before anything is packaged:
//! which action the user is offered, whether it is enabled, and the
//! validated draft that travels with the bundle.

use crate::error::{Error, Field, Result, ValidationError};
use crate::form::{DraftForm, SubmissionDraft};
use crate::service::EndpointKind;
use crate::types::{AccessRight, Submission};
use crate::workflow::{ResolvedAction, SubmissionAction};
use tracing::debug;

/// What a document submission will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    /// Document being submitted
    pub document_id: u64,
    /// Resolved action
    pub action: SubmissionAction,
    /// Endpoint the bundle goes to
    pub endpoint: EndpointKind,
    /// Validated dialog fields
    pub draft: SubmissionDraft,
}

/// Create a submission plan
///
/// Fails with `ActionDisabled` when the resolved action is disabled or is a
/// review (reviews carry a recommendation, not the document), and with a
/// validation error when a first submission lacks obligatory fields or a
/// revision has no journal to go to.
pub fn create_submission_plan(
    document_id: u64,
    submission: &Submission,
    access: AccessRight,
    form: &DraftForm,
) -> Result<SubmissionPlan> {
    let resolved = submission.resolve(access);
    debug!(
        "Document {document_id}: {:?} ({})",
        resolved.action,
        if resolved.enabled { "enabled" } else { "disabled" }
    );
    require_enabled(&resolved)?;

    let draft = match resolved.action {
        SubmissionAction::FirstSubmission => form.validate()?,
        SubmissionAction::Resubmission | SubmissionAction::CopyeditDraftUpdate => {
            let journal_id = submission
                .journal_id
                .filter(|&id| id > 0)
                .or_else(|| {
                    let id = form.journal_id.trim().parse::<u64>().ok()?;
                    (id > 0).then_some(id)
                })
                .ok_or(ValidationError {
                    fields: vec![Field::JournalId],
                })?;
            form.revision_draft(journal_id)
        }
        SubmissionAction::Review => {
            return Err(Error::ActionDisabled(
                "reviewers send a recommendation instead of the document".to_string(),
            ));
        }
    };

    Ok(SubmissionPlan {
        document_id,
        action: resolved.action,
        endpoint: resolved.action.endpoint(),
        draft,
    })
}

/// Turn a disabled resolution into an error
pub fn require_enabled(resolved: &ResolvedAction) -> Result<()> {
    if resolved.enabled {
        return Ok(());
    }
    let reason = resolved
        .reason
        .map_or_else(|| "action disabled".to_string(), |r| r.to_string());
    Err(Error::ActionDisabled(format!("{}: {reason}", resolved.action)))
}
