//! Action resolution
//!
//! One decision table decides which submit action a user is offered and
//! whether it can be used. Every entry point (menu item, toolbar button,
//! CLI command) goes through [`resolve_action`].

use crate::service::EndpointKind;
use crate::types::{AccessRight, Submission, WorkflowRole};
use serde::Serialize;
use std::fmt;

/// The submit action available for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionAction {
    /// Send the document to a journal for the first time
    FirstSubmission,
    /// Send a revision of an existing submission
    Resubmission,
    /// Hand back the copyedited draft
    CopyeditDraftUpdate,
    /// Send a reviewer recommendation
    Review,
}

impl SubmissionAction {
    /// Endpoint the action is delivered to
    pub const fn endpoint(self) -> EndpointKind {
        match self {
            Self::FirstSubmission => EndpointKind::FirstSubmission,
            Self::Resubmission => EndpointKind::Resubmission,
            Self::CopyeditDraftUpdate => EndpointKind::CopyeditDraftUpdate,
            Self::Review => EndpointKind::ReviewerRecommendation,
        }
    }

    /// Author identity is stripped from the document body for blind review
    pub const fn redacts_authors(self) -> bool {
        matches!(self, Self::FirstSubmission | Self::Resubmission)
    }

    /// Label shown to the user
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstSubmission => "Submit to journal",
            Self::Resubmission => "Resubmit",
            Self::CopyeditDraftUpdate => "Submit copyedit draft",
            Self::Review => "Send review",
        }
    }
}

impl fmt::Display for SubmissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why an action is disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisableReason {
    /// Sub-authors may never submit
    SubAuthor,
    /// Document is read-only for this user
    ReadOnly,
    /// Commenters have nothing to review before submission
    NothingToReview,
    /// Original copy of a submitted step is locked until a revision opens
    LockedOriginal,
    /// Editors and subeditors observe only
    EditorialRole,
    /// Assistants act only during copyediting
    AssistantOutsideCopyediting,
}

impl fmt::Display for DisableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::SubAuthor => "only the submitting author can submit",
            Self::ReadOnly => "document is read-only",
            Self::NothingToReview => "document has not been submitted for review",
            Self::LockedOriginal => "waiting for a revision round to open",
            Self::EditorialRole => "editors cannot submit on behalf of authors",
            Self::AssistantOutsideCopyediting => "assistants can only submit during copyediting",
        };
        f.write_str(msg)
    }
}

/// Outcome of action resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedAction {
    /// Action to offer
    pub action: SubmissionAction,
    /// Whether the action can be triggered
    pub enabled: bool,
    /// First rule that disabled the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DisableReason>,
}

/// Decide which action to offer and whether it is enabled
///
/// Pure: depends only on the submission record, the viewer's workflow role
/// and the local access right.
pub fn resolve_action(
    submission: &Submission,
    role: Option<WorkflowRole>,
    access: AccessRight,
) -> ResolvedAction {
    let version = submission.effective_version();
    let copyediting = version.is_some_and(|v| v.is_copyediting());

    let action = if !submission.is_submitted() {
        SubmissionAction::FirstSubmission
    } else if access.is_comment_only() {
        SubmissionAction::Review
    } else if copyediting {
        SubmissionAction::CopyeditDraftUpdate
    } else {
        SubmissionAction::Resubmission
    };

    let reason = disable_reason(submission, role, access, copyediting);

    ResolvedAction {
        action,
        enabled: reason.is_none(),
        reason,
    }
}

fn disable_reason(
    submission: &Submission,
    role: Option<WorkflowRole>,
    access: AccessRight,
    copyediting: bool,
) -> Option<DisableReason> {
    let submitted = submission.is_submitted();
    // A submitted record without a token counts as a locked original.
    let original = submission.effective_version().is_none_or(|v| v.is_original());

    if role == Some(WorkflowRole::SubAuthor) {
        return Some(DisableReason::SubAuthor);
    }
    if access.is_read_only() {
        return Some(DisableReason::ReadOnly);
    }
    if access.is_comment_only() && !submitted {
        return Some(DisableReason::NothingToReview);
    }
    // Copyedit drafts are updated on the original copy of step 4.
    if submitted && access == AccessRight::Write && original && !copyediting {
        return Some(DisableReason::LockedOriginal);
    }
    if submitted && role.is_some_and(WorkflowRole::is_editorial) {
        return Some(DisableReason::EditorialRole);
    }
    if submitted && role == Some(WorkflowRole::Assistant) && !copyediting {
        return Some(DisableReason::AssistantOutsideCopyediting);
    }
    None
}

impl Submission {
    /// Resolve using the workflow role carried by the record itself
    pub fn resolve(&self, access: AccessRight) -> ResolvedAction {
        resolve_action(self, self.user_role, access)
    }
}
