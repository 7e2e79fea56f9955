//! Shared CLI progress callback with styled output and spinners

use crate::cli::style::{check, cross, spinner_style, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use journal_bridge::error::Error;
use journal_bridge::pack::PackagedBundle;
use journal_bridge::submit::{Phase, ProgressCallback};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// CLI progress callback that prints to stdout with styled output
///
/// Shows a spinner while the payload is on its way to the service.
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create progress output
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.lock().unwrap_or_else(PoisonError::into_inner) = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            spinner.finish_and_clear();
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Transmitting => self.start_spinner("Sending to journal..."),
            Phase::Complete => {
                self.stop_spinner();
                println!("{} {}", check(), "Submission successful".success());
            }
            _ => println!("{}...", phase.to_string().muted()),
        }
    }

    async fn on_packaged(&self, bundle: &PackagedBundle) {
        println!(
            "  Packaged {} ({} images)",
            bundle.metadata.title.emphasis(),
            bundle.image_ids.len().accent()
        );
    }

    // The error itself is reported once by main.
    async fn on_error(&self, err: &Error) {
        self.stop_spinner();
        if matches!(err, Error::Transport(_)) {
            eprintln!(
                "{} {}",
                cross().on_stderr(),
                "Submission was not retried; run the command again to resubmit"
                    .warn()
                    .on_stderr()
            );
        }
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
