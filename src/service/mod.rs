//! Journal service interfaces
//!
//! The seams between the submission logic and the outside world: the
//! transport that delivers payloads, the lookups that tell us where a
//! document stands, and the user directory used when registering journals.

mod config;
mod factory;
mod http;

pub use config::{ConfigSource, ServiceConfig, SESSION_TOKEN_ENV, URL_ENV};
pub use factory::create_service;
pub use http::HttpService;

use crate::error::{Error, Result};
use crate::form::{JournalRegistration, ReviewSubmission};
use crate::pack::PackagedBundle;
use crate::types::{AccessRight, DocInfo, Journal, Submission};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Destination of a transport call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointKind {
    /// New submission to a journal
    FirstSubmission,
    /// Author revision of a submission under review
    Resubmission,
    /// Draft update during copyediting
    CopyeditDraftUpdate,
    /// Reviewer recommendation
    ReviewerRecommendation,
    /// Register a journal of a remote service
    JournalRegistration,
}

impl EndpointKind {
    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstSubmission => "firstSubmission",
            Self::Resubmission => "resubmission",
            Self::CopyeditDraftUpdate => "copyeditDraftUpdate",
            Self::ReviewerRecommendation => "reviewerRecommendation",
            Self::JournalRegistration => "journalRegistration",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a transport call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Packaged document
    Bundle(PackagedBundle),
    /// Reviewer recommendation for a document
    Review {
        /// Editor document id
        doc_id: u64,
        /// Validated review
        #[serde(flatten)]
        review: ReviewSubmission,
    },
    /// Journal registration
    Registration(JournalRegistration),
}

impl Payload {
    /// Form fields as the journal service reads them
    ///
    /// Lists repeat their key with a `[]` suffix, one pair per element.
    /// Absent optional fields are left out.
    pub fn form_fields(&self) -> Result<Vec<(String, String)>> {
        let Value::Object(map) = serde_json::to_value(self)? else {
            return Err(Error::Internal("payload is not a JSON object".to_string()));
        };

        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    let key = format!("{key}[]");
                    fields.extend(items.into_iter().map(|item| (key.clone(), form_value(item))));
                }
                other => fields.push((key, form_value(other))),
            }
        }
        Ok(fields)
    }
}

fn form_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Terminal result of a transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// The service accepted the payload
    Success(Value),
    /// The service or the network refused it
    Failure {
        /// Human-readable reason
        reason: String,
    },
}

impl TransportOutcome {
    /// Failure with `reason`
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Whether the service accepted the payload
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Service response, or `Error::Transport` on failure
    pub fn into_result(self) -> Result<Value> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Failure { reason } => Err(Error::Transport(reason)),
        }
    }
}

/// Delivers payloads to the journal service
///
/// Implementations own timeouts. A call never retries on its own; every
/// outcome, including network errors, comes back as a [`TransportOutcome`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `payload` to `endpoint`
    async fn submit(&self, endpoint: EndpointKind, payload: &Payload) -> TransportOutcome;
}

/// Read side of the journal service
#[async_trait]
pub trait JournalService: Send + Sync {
    /// Submission record and available journals for a document
    async fn doc_info(&self, document_id: u64) -> Result<DocInfo>;

    /// Journals offered by a remote service, as seen through the proxy
    async fn list_journals(&self, service_url: &str, key: &str) -> Result<Vec<Journal>>;
}

/// A local user found by email
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserMatch {
    /// User id
    pub user_id: u64,
    /// Username
    pub user_name: String,
}

/// Lookup of local users
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// The user owning `email`, if any
    async fn find_by_email(&self, email: &str) -> Result<Option<UserMatch>>;
}

/// Where a document stands for the current user
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Local access right on the document
    fn access_right(&self) -> AccessRight;

    /// Current submission record, fetched fresh on every call
    async fn submission(&self) -> Result<Submission>;
}

/// Role provider backed by a [`JournalService`]
pub struct DocumentRoles<'a> {
    document_id: u64,
    access: AccessRight,
    service: &'a dyn JournalService,
}

impl<'a> DocumentRoles<'a> {
    /// Roles of the current user on `document_id`
    pub fn new(document_id: u64, access: AccessRight, service: &'a dyn JournalService) -> Self {
        Self {
            document_id,
            access,
            service,
        }
    }
}

#[async_trait]
impl RoleProvider for DocumentRoles<'_> {
    fn access_right(&self) -> AccessRight {
        self.access
    }

    async fn submission(&self) -> Result<Submission> {
        Ok(self.service.doc_info(self.document_id).await?.submission)
    }
}

/// Role provider with a fixed answer
#[derive(Debug, Clone)]
pub struct StaticRoles {
    /// Access right reported
    pub access: AccessRight,
    /// Submission reported
    pub submission: Submission,
}

#[async_trait]
impl RoleProvider for StaticRoles {
    fn access_right(&self) -> AccessRight {
        self.access
    }

    async fn submission(&self) -> Result<Submission> {
        Ok(self.submission.clone())
    }
}
