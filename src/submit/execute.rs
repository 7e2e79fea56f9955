//! Phase 2: Submission execution
//!
//! Runs one submit attempt end to end: resolve, validate, package, transmit.
//! At most one attempt per document is active at a time, and a failed
//! attempt is never retried here.

use crate::document::DocumentSource;
use crate::error::{Error, Result};
use crate::form::{DraftForm, ReviewForm};
use crate::pack::{BibliographyStore, ImageStore, Packager};
use crate::service::{EndpointKind, Payload, RoleProvider, Transport};
use crate::submit::{create_submission_plan, require_enabled, Phase, ProgressCallback};
use crate::workflow::SubmissionAction;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Document that was submitted
    pub document_id: u64,
    /// Action that was performed
    pub action: SubmissionAction,
    /// Endpoint the payload went to
    pub endpoint: EndpointKind,
    /// Service response
    pub response: Value,
}

/// Drives submissions through a transport
pub struct Submitter<'a> {
    transport: &'a dyn Transport,
    packager: Packager,
    in_flight: Mutex<HashSet<u64>>,
}

/// Marks a document as busy until dropped
struct InFlightGuard<'s> {
    documents: &'s Mutex<HashSet<u64>>,
    document_id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.document_id);
    }
}

impl<'a> Submitter<'a> {
    /// Submitter using the default schema hints
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self::with_packager(transport, Packager::default())
    }

    /// Submitter using a specific packager
    pub fn with_packager(transport: &'a dyn Transport, packager: Packager) -> Self {
        Self {
            transport,
            packager,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Whether a submit for `document_id` is running
    pub fn is_in_flight(&self, document_id: u64) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&document_id)
    }

    fn begin(&self, document_id: u64) -> Result<InFlightGuard<'_>> {
        let mut documents = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !documents.insert(document_id) {
            return Err(Error::SubmissionInFlight(document_id));
        }
        Ok(InFlightGuard {
            documents: &self.in_flight,
            document_id,
        })
    }

    /// Submit a document with the action its submission record allows
    ///
    /// The dialog fields are validated before any store is consulted, and
    /// the bundle is built from a snapshot taken when packaging starts.
    pub async fn submit_document(
        &self,
        document: &dyn DocumentSource,
        roles: &dyn RoleProvider,
        form: &DraftForm,
        images: &dyn ImageStore,
        bibliography: &dyn BibliographyStore,
        progress: &dyn ProgressCallback,
    ) -> Result<SubmissionResult> {
        let document_id = document.document_id();
        let _guard = self.begin(document_id)?;

        let result = self
            .run_document(document, roles, form, images, bibliography, progress)
            .await;
        finish(result, progress).await
    }

    async fn run_document(
        &self,
        document: &dyn DocumentSource,
        roles: &dyn RoleProvider,
        form: &DraftForm,
        images: &dyn ImageStore,
        bibliography: &dyn BibliographyStore,
        progress: &dyn ProgressCallback,
    ) -> Result<SubmissionResult> {
        let document_id = document.document_id();

        progress.on_phase(Phase::Resolving).await;
        let submission = roles.submission().await?;

        progress.on_phase(Phase::Validating).await;
        let plan = create_submission_plan(document_id, &submission, roles.access_right(), form)?;
        progress
            .on_message(&format!("{} to journal {}", plan.action, plan.draft.journal_id))
            .await;

        progress.on_phase(Phase::Packaging).await;
        let bundle = self
            .packager
            .pack(document, images, bibliography, &plan.draft, plan.action)
            .await?;
        progress.on_packaged(&bundle).await;
        debug!(
            "Packaged document {document_id}: {} bytes content, {} images",
            bundle.serialized_content.len(),
            bundle.image_ids.len()
        );

        progress.on_phase(Phase::Transmitting).await;
        let response = self
            .transport
            .submit(plan.endpoint, &Payload::Bundle(bundle))
            .await
            .into_result()?;

        info!("Document {document_id} sent to {}", plan.endpoint);
        Ok(SubmissionResult {
            document_id,
            action: plan.action,
            endpoint: plan.endpoint,
            response,
        })
    }

    /// Send a reviewer recommendation for a document
    pub async fn submit_review(
        &self,
        document_id: u64,
        roles: &dyn RoleProvider,
        form: &ReviewForm,
        progress: &dyn ProgressCallback,
    ) -> Result<SubmissionResult> {
        let _guard = self.begin(document_id)?;
        let result = self.run_review(document_id, roles, form, progress).await;
        finish(result, progress).await
    }

    async fn run_review(
        &self,
        document_id: u64,
        roles: &dyn RoleProvider,
        form: &ReviewForm,
        progress: &dyn ProgressCallback,
    ) -> Result<SubmissionResult> {
        progress.on_phase(Phase::Resolving).await;
        let submission = roles.submission().await?;
        let resolved = submission.resolve(roles.access_right());
        require_enabled(&resolved)?;
        if resolved.action != SubmissionAction::Review {
            return Err(Error::ActionDisabled(format!(
                "{}: only reviewers send recommendations",
                SubmissionAction::Review
            )));
        }

        progress.on_phase(Phase::Validating).await;
        let review = form.validate()?;

        progress.on_phase(Phase::Transmitting).await;
        let endpoint = SubmissionAction::Review.endpoint();
        let response = self
            .transport
            .submit(endpoint, &Payload::Review { doc_id: document_id, review })
            .await
            .into_result()?;

        info!("Review for document {document_id} sent");
        Ok(SubmissionResult {
            document_id,
            action: SubmissionAction::Review,
            endpoint,
            response,
        })
    }
}

async fn finish(
    result: Result<SubmissionResult>,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionResult> {
    match &result {
        Ok(_) => progress.on_phase(Phase::Complete).await,
        Err(e) => progress.on_error(e).await,
    }
    result
}
