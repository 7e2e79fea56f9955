//! Mock journal service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use journal_bridge::error::{Error, Result};
use journal_bridge::pack::{
    BibEntry, BibliographyStore, ImageRecord, ImageStore, MemoryBibliographyStore,
    MemoryImageStore,
};
use journal_bridge::service::{
    EndpointKind, JournalService, Payload, Transport, TransportOutcome, UserDirectory, UserMatch,
};
use journal_bridge::types::{DocInfo, Journal};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Call record for `Transport::submit`
#[derive(Debug, Clone)]
pub struct SubmitCall {
    pub endpoint: EndpointKind,
    pub payload: Value,
}

/// Simple mock journal service for testing
///
/// Implements every service trait by hand so tests can inspect exactly what
/// was sent.
///
/// Features:
/// - Call tracking for verification
/// - Configurable doc info, journal listings and users
/// - Error injection for failure path testing
/// - Yields once inside `submit`, so concurrent attempts interleave
pub struct MockJournalService {
    doc_infos: Mutex<HashMap<u64, DocInfo>>,
    journals: Mutex<Vec<Journal>>,
    users: Mutex<HashMap<String, UserMatch>>,
    response: Mutex<Value>,
    // Call tracking
    submit_calls: Mutex<Vec<SubmitCall>>,
    doc_info_calls: Mutex<Vec<u64>>,
    user_calls: Mutex<Vec<String>>,
    // Error injection
    fail_submit: Mutex<Option<String>>,
    fail_user_lookup: Mutex<Option<String>>,
}

impl Default for MockJournalService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJournalService {
    /// Create an empty mock that accepts every submission
    pub fn new() -> Self {
        Self {
            doc_infos: Mutex::new(HashMap::new()),
            journals: Mutex::new(Vec::new()),
            users: Mutex::new(HashMap::new()),
            response: Mutex::new(json!({"status": "ok"})),
            submit_calls: Mutex::new(Vec::new()),
            doc_info_calls: Mutex::new(Vec::new()),
            user_calls: Mutex::new(Vec::new()),
            fail_submit: Mutex::new(None),
            fail_user_lookup: Mutex::new(None),
        }
    }

    /// Set the doc info returned for a document
    pub fn set_doc_info(&self, document_id: u64, info: DocInfo) {
        self.doc_infos.lock().unwrap().insert(document_id, info);
    }

    /// Set the journals returned by `list_journals`
    pub fn set_journals(&self, journals: Vec<Journal>) {
        *self.journals.lock().unwrap() = journals;
    }

    /// Register a local user under an email
    pub fn add_user(&self, email: &str, user_id: u64, user_name: &str) {
        self.users.lock().unwrap().insert(
            email.to_string(),
            UserMatch {
                user_id,
                user_name: user_name.to_string(),
            },
        );
    }

    /// Set the body returned for successful submissions
    pub fn set_response(&self, response: Value) {
        *self.response.lock().unwrap() = response;
    }

    // === Error injection methods ===

    /// Make `submit` report failure
    pub fn fail_submit(&self, reason: &str) {
        *self.fail_submit.lock().unwrap() = Some(reason.to_string());
    }

    /// Make `find_by_email` return an error
    pub fn fail_user_lookup(&self, msg: &str) {
        *self.fail_user_lookup.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all `submit` calls
    pub fn get_submit_calls(&self) -> Vec<SubmitCall> {
        self.submit_calls.lock().unwrap().clone()
    }

    /// Get all documents `doc_info` was called for
    pub fn get_doc_info_calls(&self) -> Vec<u64> {
        self.doc_info_calls.lock().unwrap().clone()
    }

    /// Get all emails `find_by_email` was called with
    pub fn get_user_calls(&self) -> Vec<String> {
        self.user_calls.lock().unwrap().clone()
    }

    /// Assert that exactly one payload went to `endpoint`
    pub fn assert_submitted_once_to(&self, endpoint: EndpointKind) {
        let calls = self.get_submit_calls();
        assert!(
            calls.len() == 1 && calls[0].endpoint == endpoint,
            "Expected one submit to {endpoint} but got: {calls:?}"
        );
    }

    /// Assert that nothing was submitted
    pub fn assert_nothing_submitted(&self) {
        let calls = self.get_submit_calls();
        assert!(calls.is_empty(), "Expected no submit calls but got: {calls:?}");
    }
}

#[async_trait]
impl Transport for MockJournalService {
    async fn submit(&self, endpoint: EndpointKind, payload: &Payload) -> TransportOutcome {
        self.submit_calls.lock().unwrap().push(SubmitCall {
            endpoint,
            payload: serde_json::to_value(payload).unwrap(),
        });

        tokio::task::yield_now().await;

        if let Some(reason) = self.fail_submit.lock().unwrap().as_ref() {
            return TransportOutcome::failure(reason.clone());
        }
        TransportOutcome::Success(self.response.lock().unwrap().clone())
    }
}

#[async_trait]
impl JournalService for MockJournalService {
    async fn doc_info(&self, document_id: u64) -> Result<DocInfo> {
        self.doc_info_calls.lock().unwrap().push(document_id);
        self.doc_infos
            .lock()
            .unwrap()
            .get(&document_id)
            .cloned()
            .ok_or_else(|| Error::Transport(format!("no doc info for {document_id}")))
    }

    async fn list_journals(&self, _service_url: &str, _key: &str) -> Result<Vec<Journal>> {
        Ok(self.journals.lock().unwrap().clone())
    }
}

#[async_trait]
impl UserDirectory for MockJournalService {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserMatch>> {
        self.user_calls.lock().unwrap().push(email.to_string());
        if let Some(msg) = self.fail_user_lookup.lock().unwrap().as_ref() {
            return Err(Error::Transport(msg.clone()));
        }
        Ok(self.users.lock().unwrap().get(email).cloned())
    }
}

/// Image store that counts lookups
pub struct CountingImageStore {
    inner: MemoryImageStore,
    lookups: AtomicUsize,
}

impl CountingImageStore {
    pub fn new(images: impl IntoIterator<Item = ImageRecord>) -> Self {
        Self {
            inner: MemoryImageStore::new(images),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageStore for CountingImageStore {
    async fn lookup(&self, ids: &BTreeSet<String>) -> Result<BTreeMap<String, ImageRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(ids).await
    }
}

/// Bibliography store that counts lookups
pub struct CountingBibliographyStore {
    inner: MemoryBibliographyStore,
    lookups: AtomicUsize,
}

impl CountingBibliographyStore {
    pub fn new(entries: impl IntoIterator<Item = (String, BibEntry)>) -> Self {
        Self {
            inner: MemoryBibliographyStore::new(entries),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BibliographyStore for CountingBibliographyStore {
    async fn lookup(&self, keys: &BTreeSet<String>) -> Result<BTreeMap<String, BibEntry>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(keys).await
    }
}
