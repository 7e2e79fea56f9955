//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different hosts (CLI, editor integration, etc.) to
//! receive progress updates during a submission.

use crate::error::Error;
use crate::pack::PackagedBundle;
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fetching the submission record and resolving the action
    Resolving,
    /// Validating dialog fields
    Validating,
    /// Building the bundle
    Packaging,
    /// Sending the payload to the service
    Transmitting,
    /// Submission complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolving => "Resolving",
            Self::Validating => "Validating",
            Self::Packaging => "Packaging",
            Self::Transmitting => "Transmitting",
            Self::Complete => "Complete",
        })
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during submission.
/// - CLI implementations can print to terminal
/// - Editor hosts can disable their submit button and show alerts
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the bundle has been built
    async fn on_packaged(&self, bundle: &PackagedBundle);

    /// Called when the submission fails
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_packaged(&self, _bundle: &PackagedBundle) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
