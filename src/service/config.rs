//! Service configuration

use crate::error::{Error, Result};
use std::env;
use url::Url;

/// Environment variable holding the service base URL
pub const URL_ENV: &str = "JBRIDGE_URL";

/// Environment variable holding the session token
pub const SESSION_TOKEN_ENV: &str = "JBRIDGE_SESSION_TOKEN";

/// Where the base URL was obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Command line flag
    Flag,
    /// Environment variable
    EnvVar,
}

/// Connection settings for the journal service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL, always ending in `/`
    pub base_url: Url,
    /// Session token sent as `X-CSRFToken`
    pub session_token: Option<String>,
    /// Where the base URL came from
    pub source: ConfigSource,
}

impl ServiceConfig {
    /// Resolve from flags, falling back to the process environment
    ///
    /// Priority:
    /// 1. `--url` / `--session-token` flags
    /// 2. `JBRIDGE_URL` / `JBRIDGE_SESSION_TOKEN` environment variables
    pub fn resolve(flag_url: Option<&str>, flag_token: Option<&str>) -> Result<Self> {
        Self::resolve_with(flag_url, flag_token, |name| env::var(name).ok())
    }

    /// Resolve from flags, falling back to `lookup` for environment values
    pub fn resolve_with(
        flag_url: Option<&str>,
        flag_token: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let (raw_url, source) = match flag_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => (url.to_string(), ConfigSource::Flag),
            None => match lookup(URL_ENV).filter(|u| !u.trim().is_empty()) {
                Some(url) => (url.trim().to_string(), ConfigSource::EnvVar),
                None => {
                    return Err(Error::Config(format!(
                        "No journal service configured. Pass --url or set {URL_ENV}"
                    )));
                }
            },
        };

        let session_token = flag_token
            .map(ToString::to_string)
            .or_else(|| lookup(SESSION_TOKEN_ENV))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            base_url: parse_base_url(&raw_url)?,
            session_token,
            source,
        })
    }
}

// Url::join drops the last path segment unless the base ends in '/'.
fn parse_base_url(raw: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| Error::Config(format!("invalid service URL {raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "unsupported URL scheme {other}: {raw}"
        ))),
    }
}
