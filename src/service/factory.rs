//! Service factory
//!
//! Creates the journal service client from flags and environment.

use crate::error::Result;
use crate::service::{HttpService, ServiceConfig};
use tracing::debug;

/// Create the journal service client
///
/// Resolves configuration (flags first, then environment) and builds an
/// HTTP client for it.
pub fn create_service(flag_url: Option<&str>, flag_token: Option<&str>) -> Result<HttpService> {
    let config = ServiceConfig::resolve(flag_url, flag_token)?;
    debug!(
        "Using journal service at {} (from {:?}, token: {})",
        config.base_url,
        config.source,
        if config.session_token.is_some() { "yes" } else { "no" }
    );
    Ok(HttpService::new(config.base_url, config.session_token))
}
