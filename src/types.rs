//! Core types for journal-bridge

use crate::error::Error;
use crate::workflow::VersionToken;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Submission status as reported by the journal service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Not fetched yet
    Unknown,
    /// Document has never been submitted
    #[serde(alias = "unsubmitted")]
    NotSubmitted,
    /// Document belongs to a submission on the service
    Submitted,
}

/// The viewing user's role within the external editorial workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowRole {
    /// Submitting author
    #[serde(rename = "author")]
    Author,
    /// Co-author who did not submit
    #[serde(rename = "sub-author")]
    SubAuthor,
    /// Peer reviewer
    #[serde(rename = "reviewer")]
    Reviewer,
    /// Journal manager or site admin
    #[serde(rename = "editor")]
    Editor,
    /// Section editor
    #[serde(rename = "subeditor")]
    Subeditor,
    /// Editorial assistant (copyeditor)
    #[serde(rename = "assistant")]
    Assistant,
}

impl WorkflowRole {
    /// Wire name of the role
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::SubAuthor => "sub-author",
            Self::Reviewer => "reviewer",
            Self::Editor => "editor",
            Self::Subeditor => "subeditor",
            Self::Assistant => "assistant",
        }
    }

    /// Editorial roles observe a submission but never submit into it
    pub const fn is_editorial(self) -> bool {
        matches!(self, Self::Editor | Self::Subeditor)
    }
}

impl fmt::Display for WorkflowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(Self::Author),
            "sub-author" => Ok(Self::SubAuthor),
            "reviewer" => Ok(Self::Reviewer),
            "editor" => Ok(Self::Editor),
            "subeditor" => Ok(Self::Subeditor),
            "assistant" => Ok(Self::Assistant),
            other => Err(Error::Parse(format!("unknown workflow role: {other}"))),
        }
    }
}

/// Local document permission of the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessRight {
    /// Read only, comments visible
    Read,
    /// Read only, comments hidden
    ReadWithoutComments,
    /// May comment
    Comment,
    /// Reviewer access: may comment
    Review,
    /// May edit with tracked changes
    WriteTracked,
    /// Full write access
    Write,
}

impl AccessRight {
    /// Wire name of the access right
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWithoutComments => "read-without-comments",
            Self::Comment => "comment",
            Self::Review => "review",
            Self::WriteTracked => "write-tracked",
            Self::Write => "write",
        }
    }

    /// Member of the read-only set
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Read | Self::ReadWithoutComments)
    }

    /// Member of the comment-only set
    pub const fn is_comment_only(self) -> bool {
        matches!(self, Self::Comment | Self::Review)
    }
}

impl fmt::Display for AccessRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "read-without-comments" => Ok(Self::ReadWithoutComments),
            "comment" => Ok(Self::Comment),
            "review" => Ok(Self::Review),
            "write-tracked" => Ok(Self::WriteTracked),
            "write" => Ok(Self::Write),
            other => Err(Error::Parse(format!("unknown access right: {other}"))),
        }
    }
}

/// Client-side mirror of a submission on the journal service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Lifecycle status
    pub status: SubmissionStatus,
    /// Workflow version token, only meaningful once submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionToken>,
    /// Viewing user's workflow role, only meaningful once submitted
    #[serde(
        default,
        deserialize_with = "role_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_role: Option<WorkflowRole>,
    /// Submission id on the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<u64>,
    /// Journal the submission went to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_id: Option<u64>,
}

impl Submission {
    /// State before the service has answered
    pub const fn unknown() -> Self {
        Self {
            status: SubmissionStatus::Unknown,
            version: None,
            user_role: None,
            submission_id: None,
            journal_id: None,
        }
    }

    /// A document that was never submitted
    pub const fn not_submitted() -> Self {
        Self {
            status: SubmissionStatus::NotSubmitted,
            ..Self::unknown()
        }
    }

    /// A submitted document at `version`, seen by `role`
    pub const fn submitted(version: VersionToken, role: Option<WorkflowRole>) -> Self {
        Self {
            status: SubmissionStatus::Submitted,
            version: Some(version),
            user_role: role,
            submission_id: None,
            journal_id: None,
        }
    }

    /// Whether the document is part of a submission
    pub fn is_submitted(&self) -> bool {
        self.status == SubmissionStatus::Submitted
    }

    /// Version token, ignored unless submitted
    pub fn effective_version(&self) -> Option<VersionToken> {
        if self.is_submitted() {
            self.version
        } else {
            None
        }
    }

    /// Workflow role, ignored unless submitted
    pub fn effective_role(&self) -> Option<WorkflowRole> {
        if self.is_submitted() {
            self.user_role
        } else {
            None
        }
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::unknown()
    }
}

// The service sends "" for users without a workflow role.
fn role_or_none<'de, D>(deserializer: D) -> Result<Option<WorkflowRole>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(role) => role.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// Journal listings from the service send ids as strings.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A journal registered on the journal service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal id
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: u64,
    /// Display name
    pub name: String,
    /// Contact email published by the journal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Local user matched by contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_user_id: Option<u64>,
    /// Username of the matched local user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_user_name: Option<String>,
}

/// What the service knows about one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocInfo {
    /// Submission record for the document
    pub submission: Submission,
    /// Journals the document can be submitted to
    #[serde(default)]
    pub journals: Vec<Journal>,
}

impl DocInfo {
    /// No journals means the installation offers no submission at all
    pub fn offers_submission(&self) -> bool {
        !self.journals.is_empty()
    }
}
