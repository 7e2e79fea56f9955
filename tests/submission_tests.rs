//! Submission flow tests against the mock journal service

mod common;

use common::fixtures::{
    make_document, make_entry, make_form, make_image, make_journal, make_submitted,
    make_unsubmitted_info,
};
use common::mock_service::{CountingBibliographyStore, CountingImageStore, MockJournalService};
use journal_bridge::document::Document;
use journal_bridge::error::{Error, Field, PackagingError};
use journal_bridge::form::{DraftForm, ReviewForm};
use journal_bridge::pack::{MemoryBibliographyStore, MemoryImageStore};
use journal_bridge::service::{DocumentRoles, EndpointKind, StaticRoles};
use journal_bridge::submit::{NoopProgress, Submitter};
use journal_bridge::types::{AccessRight, DocInfo, Submission, WorkflowRole};
use journal_bridge::workflow::SubmissionAction;
use serde_json::Value;

fn stores() -> (MemoryImageStore, MemoryBibliographyStore) {
    (
        MemoryImageStore::new([make_image("a"), make_image("b"), make_image("c")]),
        MemoryBibliographyStore::new([make_entry("k1"), make_entry("k2")]),
    )
}

fn unsubmitted(access: AccessRight) -> StaticRoles {
    StaticRoles {
        access,
        submission: Submission::not_submitted(),
    }
}

fn sent_content(service: &MockJournalService) -> Value {
    let calls = service.get_submit_calls();
    let raw = calls[0].payload["content"].as_str().unwrap().to_string();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_first_submission_sends_redacted_minimized_bundle() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();

    let result = submitter
        .submit_document(
            &make_document(42),
            &unsubmitted(AccessRight::Write),
            &make_form(3),
            &images,
            &bib,
            &NoopProgress,
        )
        .await
        .unwrap();

    assert_eq!(result.action, SubmissionAction::FirstSubmission);
    service.assert_submitted_once_to(EndpointKind::FirstSubmission);

    let payload = &service.get_submit_calls()[0].payload;
    assert_eq!(payload["doc_id"], 42);
    assert_eq!(payload["journal_id"], 3);
    assert_eq!(payload["image_ids"], serde_json::json!(["a", "b"]));
    // Corresponding author travels as trimmed metadata, not in the body.
    assert_eq!(payload["firstname"], "Ada");
    assert_eq!(payload["lastname"], "Lovelace");

    let content = sent_content(&service);
    let authors = &content["content"][1];
    assert_eq!(authors["attrs"]["metadata"], "authors");
    assert_eq!(authors["content"], serde_json::json!([]));

    let bibliography: Value =
        serde_json::from_str(payload["bibliography"].as_str().unwrap()).unwrap();
    assert_eq!(bibliography.as_object().unwrap().len(), 1);
    assert!(bibliography.get("k1").is_some());
}

#[tokio::test]
async fn test_empty_abstract_rejected_before_lookup_or_transport() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let images = CountingImageStore::new([make_image("a"), make_image("b")]);
    let bib = CountingBibliographyStore::new([make_entry("k1")]);
    let form = DraftForm {
        abstract_text: "   ".to_string(),
        ..make_form(3)
    };

    let err = submitter
        .submit_document(
            &make_document(42),
            &unsubmitted(AccessRight::Write),
            &form,
            &images,
            &bib,
            &NoopProgress,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(ref v) if v.names(Field::Abstract)));
    assert_eq!(images.lookups(), 0);
    assert_eq!(bib.lookups(), 0);
    service.assert_nothing_submitted();
}

#[tokio::test]
async fn test_copyedit_draft_update_end_to_end() {
    let service = MockJournalService::new();
    service.set_doc_info(
        42,
        DocInfo {
            submission: make_submitted("4.0.0.0", Some(WorkflowRole::Author), 3),
            journals: vec![make_journal(3, "Annals", None)],
        },
    );
    let roles = DocumentRoles::new(42, AccessRight::Write, &service);
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();

    let result = submitter
        .submit_document(
            &make_document(42),
            &roles,
            &DraftForm::default(),
            &images,
            &bib,
            &NoopProgress,
        )
        .await
        .unwrap();

    assert_eq!(result.action, SubmissionAction::CopyeditDraftUpdate);
    assert_eq!(service.get_doc_info_calls(), vec![42]);
    service.assert_submitted_once_to(EndpointKind::CopyeditDraftUpdate);
    // Copyediting works on the named manuscript.
    let content = sent_content(&service);
    assert_eq!(content["content"][1]["content"][0]["attrs"]["lastname"], "Lovelace");
    assert_eq!(service.get_submit_calls()[0].payload["journal_id"], 3);
}

#[tokio::test]
async fn test_resubmission_is_redacted() {
    let service = MockJournalService::new();
    let roles = StaticRoles {
        access: AccessRight::WriteTracked,
        submission: make_submitted("3.0.0.1", Some(WorkflowRole::Author), 5),
    };
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();

    submitter
        .submit_document(
            &make_document(42),
            &roles,
            &DraftForm::default(),
            &images,
            &bib,
            &NoopProgress,
        )
        .await
        .unwrap();

    service.assert_submitted_once_to(EndpointKind::Resubmission);
    let content = sent_content(&service);
    assert_eq!(content["content"][1]["content"], serde_json::json!([]));
}

#[tokio::test]
async fn test_disabled_action_never_reaches_transport() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();
    let roles = StaticRoles {
        access: AccessRight::Write,
        submission: make_submitted("1.0.0.0", Some(WorkflowRole::Assistant), 3),
    };

    let err = submitter
        .submit_document(
            &make_document(42),
            &roles,
            &make_form(3),
            &images,
            &bib,
            &NoopProgress,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ActionDisabled(_)));
    service.assert_nothing_submitted();
}

#[tokio::test]
async fn test_missing_image_fails_without_sending() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let images = MemoryImageStore::new([make_image("a")]);
    let bib = MemoryBibliographyStore::new([make_entry("k1")]);

    let err = submitter
        .submit_document(
            &make_document(42),
            &unsubmitted(AccessRight::Write),
            &make_form(3),
            &images,
            &bib,
            &NoopProgress,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Packaging(PackagingError::MissingImage(ref id)) if id == "b"
    ));
    service.assert_nothing_submitted();
}

#[tokio::test]
async fn test_transport_failure_is_reported_without_retry() {
    let service = MockJournalService::new();
    service.fail_submit("502 Bad Gateway");
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();
    let document = make_document(42);
    let roles = unsubmitted(AccessRight::Write);

    let err = submitter
        .submit_document(&document, &roles, &make_form(3), &images, &bib, &NoopProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(ref reason) if reason.contains("502")));
    assert_eq!(service.get_submit_calls().len(), 1);
    assert!(!submitter.is_in_flight(42));

    // A user re-trigger runs again from the start.
    submitter
        .submit_document(&document, &roles, &make_form(3), &images, &bib, &NoopProgress)
        .await
        .unwrap_err();
    assert_eq!(service.get_submit_calls().len(), 2);
}

#[tokio::test]
async fn test_concurrent_submit_for_same_document_is_rejected() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();
    let document = make_document(42);
    let roles = unsubmitted(AccessRight::Write);
    let form = make_form(3);

    let (first, second) = tokio::join!(
        submitter.submit_document(&document, &roles, &form, &images, &bib, &NoopProgress),
        submitter.submit_document(&document, &roles, &form, &images, &bib, &NoopProgress),
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(Error::SubmissionInFlight(42))));
    assert_eq!(service.get_submit_calls().len(), 1);
    assert!(!submitter.is_in_flight(42));
}

#[tokio::test]
async fn test_different_documents_submit_concurrently() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let (images, bib) = stores();
    let (one, two): (Document, Document) = (make_document(1), make_document(2));
    let roles = unsubmitted(AccessRight::Write);
    let form = make_form(3);

    let (first, second) = tokio::join!(
        submitter.submit_document(&one, &roles, &form, &images, &bib, &NoopProgress),
        submitter.submit_document(&two, &roles, &form, &images, &bib, &NoopProgress),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(service.get_submit_calls().len(), 2);
}

#[tokio::test]
async fn test_reviewer_recommendation() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let roles = StaticRoles {
        access: AccessRight::Review,
        submission: make_submitted("1.0.0.0", Some(WorkflowRole::Reviewer), 3),
    };
    let form = ReviewForm {
        editor_message: "Convincing.".to_string(),
        editor_author_message: "Please expand section 2.".to_string(),
        recommendation: "revisions-required".to_string(),
    };

    let result = submitter
        .submit_review(42, &roles, &form, &NoopProgress)
        .await
        .unwrap();

    assert_eq!(result.action, SubmissionAction::Review);
    service.assert_submitted_once_to(EndpointKind::ReviewerRecommendation);
    let payload = &service.get_submit_calls()[0].payload;
    assert_eq!(payload["doc_id"], 42);
    assert_eq!(payload["recommendation"], 2);
    assert_eq!(payload["editor_author_message"], "Please expand section 2.");
}

#[tokio::test]
async fn test_review_requires_every_field() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let roles = StaticRoles {
        access: AccessRight::Comment,
        submission: make_submitted("1.0.0.0", Some(WorkflowRole::Reviewer), 3),
    };

    let err = submitter
        .submit_review(42, &roles, &ReviewForm::default(), &NoopProgress)
        .await
        .unwrap_err();

    let Error::Validation(validation) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        validation.fields,
        vec![
            Field::EditorMessage,
            Field::EditorAuthorMessage,
            Field::Recommendation
        ]
    );
    service.assert_nothing_submitted();
}

#[tokio::test]
async fn test_author_cannot_send_review() {
    let service = MockJournalService::new();
    let submitter = Submitter::new(&service);
    let roles = StaticRoles {
        access: AccessRight::Write,
        submission: make_submitted("3.0.0.1", Some(WorkflowRole::Author), 3),
    };
    let form = ReviewForm {
        editor_message: "x".to_string(),
        editor_author_message: "y".to_string(),
        recommendation: "1".to_string(),
    };

    let err = submitter
        .submit_review(42, &roles, &form, &NoopProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ActionDisabled(_)));
}

#[tokio::test]
async fn test_doc_info_feeds_prefill() {
    let info = make_unsubmitted_info(vec![make_journal(8, "Annals", None)]);
    let form = DraftForm::prefill(
        &make_document(42),
        &journal_bridge::document::SchemaHints::default(),
        &journal_bridge::form::LocalUser::default(),
        &info.journals,
    );
    assert_eq!(form.journal_id, "8");
    assert_eq!(form.firstname, "Ada");
    assert_eq!(form.affiliation, "Analytical Society");
    assert_eq!(form.abstract_text, "We study engines.");
}
