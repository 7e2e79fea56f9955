//! journal-bridge - submit editor documents to a journal management service
//!
//! The pieces, bottom up:
//! - [`workflow`] decides which submit action a user gets and whether it is
//!   enabled, from the submission record, the workflow role and the local
//!   access right.
//! - [`form`] validates the dialog fields that go with an action.
//! - [`pack`] turns a document into a minimized bundle, redacting author
//!   identity for blind review.
//! - [`service`] holds the transport and lookup interfaces plus their HTTP
//!   implementation.
//! - [`submit`] ties these together for one submit attempt.

pub mod document;
pub mod error;
pub mod form;
pub mod journals;
pub mod pack;
pub mod service;
pub mod submit;
pub mod types;
pub mod workflow;

pub use error::{Error, Result};
