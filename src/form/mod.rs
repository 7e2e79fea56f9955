//! Dialog field validation
//!
//! Local, synchronous checks that gate packaging and transport. A form that
//! fails validation never reaches a store or the service.

mod draft;
mod journal;
mod review;

pub use draft::{DraftForm, LocalUser, SubmissionDraft};
pub use journal::{JournalRegistration, RegistrationForm};
pub use review::{Recommendation, ReviewForm, ReviewSubmission};
