//! HTTP adapter for the journal service
//!
//! Requests carry form-encoded bodies, responses are JSON.

use crate::error::{Error, Result};
use crate::service::{
    EndpointKind, JournalService, Payload, Transport, TransportOutcome, UserDirectory, UserMatch,
};
use crate::types::{DocInfo, Journal};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 40;

/// Header carrying the session token
const TOKEN_HEADER: &str = "X-CSRFToken";

#[derive(Deserialize)]
struct JournalList {
    #[serde(default)]
    journals: Vec<Journal>,
}

// The user lookup answers `{}` when nobody owns the address.
#[derive(Deserialize)]
struct UserResponse {
    user_id: Option<u64>,
    user_name: Option<String>,
}

/// Journal service reached over HTTP
pub struct HttpService {
    client: Client,
    base_url: Url,
    session_token: Option<String>,
}

impl HttpService {
    /// Create a service rooted at `base_url`
    ///
    /// `base_url` must end in `/` for relative paths to resolve below it.
    pub fn new(base_url: Url, session_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            session_token,
        }
    }

    /// Base URL requests are resolved against
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Path of the endpoint, relative to the base URL
    pub const fn endpoint_path(endpoint: EndpointKind) -> &'static str {
        match endpoint {
            EndpointKind::FirstSubmission | EndpointKind::Resubmission => "proxy/ojs/author_submit",
            EndpointKind::CopyeditDraftUpdate => "proxy/ojs/copyedit_draft_submit",
            EndpointKind::ReviewerRecommendation => "proxy/ojs/reviewer_submit",
            EndpointKind::JournalRegistration => "ojs/save_journal/",
        }
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint path {path}: {e}")))
    }

    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request
                .header(TOKEN_HEADER, token)
                .header(reqwest::header::REFERER, self.base_url.as_str()),
            None => request,
        }
    }
}

#[async_trait]
impl Transport for HttpService {
    async fn submit(&self, endpoint: EndpointKind, payload: &Payload) -> TransportOutcome {
        let url = match self.url(Self::endpoint_path(endpoint)) {
            Ok(url) => url,
            Err(e) => return TransportOutcome::failure(e.to_string()),
        };
        let fields = match payload.form_fields() {
            Ok(fields) => fields,
            Err(e) => return TransportOutcome::failure(e.to_string()),
        };
        debug!("POST {url} ({endpoint}, {} fields)", fields.len());

        let response = match self
            .with_token(self.client.post(url).form(&fields))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("{endpoint} request failed: {e}");
                return TransportOutcome::failure(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{status}: {}", body.trim())
            };
            return TransportOutcome::failure(reason);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return TransportOutcome::failure(e.to_string()),
        };
        let mut body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        // Registration answers 201 for a new journal and 200 for a known one.
        if endpoint == EndpointKind::JournalRegistration {
            let created = Value::Bool(status == StatusCode::CREATED);
            match body.as_object_mut() {
                Some(map) => {
                    map.insert("created".to_string(), created);
                }
                None => body = serde_json::json!({ "created": created }),
            }
        }

        TransportOutcome::Success(body)
    }
}

#[async_trait]
impl JournalService for HttpService {
    async fn doc_info(&self, document_id: u64) -> Result<DocInfo> {
        let url = self.url("ojs/get_doc_info/")?;
        debug!("Fetching doc info for document {document_id}");

        let info = self
            .with_token(self.client.post(url))
            .form(&[("doc_id", document_id.to_string())])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Transport(format!("could not obtain submission info: {e}")))?
            .json()
            .await?;

        Ok(info)
    }

    async fn list_journals(&self, service_url: &str, key: &str) -> Result<Vec<Journal>> {
        let url = self.url("proxy/ojs/journals")?;

        let list: JournalList = self
            .with_token(self.client.get(url))
            .query(&[("url", service_url), ("key", key)])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Transport(format!("could not connect to journal service: {e}")))?
            .json()
            .await?;

        debug!("Service at {service_url} offers {} journals", list.journals.len());
        Ok(list.journals)
    }
}

#[async_trait]
impl UserDirectory for HttpService {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserMatch>> {
        let url = self.url("ojs/get_user/")?;

        let user: UserResponse = self
            .with_token(self.client.post(url))
            .form(&[("email", email)])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Transport(format!("user lookup failed: {e}")))?
            .json()
            .await?;

        Ok(match (user.user_id, user.user_name) {
            (Some(user_id), Some(user_name)) => Some(UserMatch { user_id, user_name }),
            _ => None,
        })
    }
}
