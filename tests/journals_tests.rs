//! Journal administration tests against the mock journal service

mod common;

use common::fixtures::make_journal;
use common::mock_service::MockJournalService;
use journal_bridge::error::{Error, Field};
use journal_bridge::form::RegistrationForm;
use journal_bridge::journals::{
    fetch_journals, match_contacts, register_journal, registration_form, RegistrationOutcome,
};
use journal_bridge::service::EndpointKind;
use serde_json::json;

#[tokio::test]
async fn test_journals_sorted_and_matched() {
    let service = MockJournalService::new();
    service.set_journals(vec![
        make_journal(12, "Later Journal", Some("later@example.org")),
        make_journal(3, "Early Journal", Some("editor@example.org")),
        make_journal(7, "Quiet Journal", None),
    ]);
    service.add_user("editor@example.org", 21, "eddie");

    let journals = fetch_journals(&service, &service, "https://ojs.example.org", "secret")
        .await
        .unwrap();

    let ids: Vec<u64> = journals.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![3, 7, 12]);
    assert_eq!(journals[0].matched_user_id, Some(21));
    assert_eq!(journals[0].matched_user_name.as_deref(), Some("eddie"));
    assert_eq!(journals[2].matched_user_id, None);
    // Journals without a contact are never looked up.
    assert_eq!(
        service.get_user_calls(),
        vec!["editor@example.org", "later@example.org"]
    );
}

#[tokio::test]
async fn test_failed_user_lookup_leaves_journal_unmatched() {
    let service = MockJournalService::new();
    service.fail_user_lookup("connection reset");

    let journals = match_contacts(
        vec![make_journal(1, "Annals", Some("ed@example.org"))],
        &service,
    )
    .await;

    assert_eq!(journals.len(), 1);
    assert_eq!(journals[0].matched_user_id, None);
}

#[tokio::test]
async fn test_fetch_requires_url_and_key() {
    let service = MockJournalService::new();
    let err = fetch_journals(&service, &service, " ", "").await.unwrap_err();
    let Error::Validation(validation) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(validation.fields, vec![Field::ServiceUrl, Field::ServiceKey]);
}

#[tokio::test]
async fn test_register_matched_journal() {
    let service = MockJournalService::new();
    service.set_response(json!({"created": true}));
    let mut journal = make_journal(4, "Annals", Some("ed@example.org"));
    journal.matched_user_id = Some(21);

    let form = registration_form(&journal, "https://ojs.example.org", "secret");
    assert_eq!(form.editor_id, "21");

    let outcome = register_journal(&service, &form).await.unwrap();
    assert_eq!(outcome, RegistrationOutcome::Created);
    service.assert_submitted_once_to(EndpointKind::JournalRegistration);

    let payload = &service.get_submit_calls()[0].payload;
    assert_eq!(payload["ojs_jid"], 4);
    assert_eq!(payload["editor_id"], 21);
    assert_eq!(payload["ojs_key"], "secret");
}

#[tokio::test]
async fn test_register_existing_journal() {
    let service = MockJournalService::new();
    service.set_response(json!({"created": false}));
    let form = RegistrationForm {
        service_url: "https://ojs.example.org".to_string(),
        service_key: "secret".to_string(),
        journal_id: 4,
        name: "Annals".to_string(),
        editor_id: "21".to_string(),
    };

    let outcome = register_journal(&service, &form).await.unwrap();
    assert_eq!(outcome, RegistrationOutcome::AlreadyPresent);
}

#[tokio::test]
async fn test_register_rejects_non_numeric_editor() {
    let service = MockJournalService::new();
    let form = RegistrationForm {
        service_url: "https://ojs.example.org".to_string(),
        service_key: "secret".to_string(),
        journal_id: 4,
        name: String::new(),
        editor_id: "eddie".to_string(),
    };

    let err = register_journal(&service, &form).await.unwrap_err();
    let Error::Validation(validation) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(validation.names(Field::JournalName));
    assert!(validation.names(Field::EditorId));
    service.assert_nothing_submitted();
}

#[tokio::test]
async fn test_register_failure_is_transport_error() {
    let service = MockJournalService::new();
    service.fail_submit("400 Bad Request");
    let form = registration_form(
        &make_journal(4, "Annals", None),
        "https://ojs.example.org",
        "secret",
    );
    let form = RegistrationForm {
        editor_id: "1".to_string(),
        ..form
    };

    let err = register_journal(&service, &form).await.unwrap_err();
    assert!(matches!(err, Error::Transport(ref r) if r.contains("could not save journal")));
}
