//! CLI commands
//!
//! Command implementations for the `jbridge` binary.

mod input;
mod journals;
mod pack;
mod progress;
mod status;
mod style;
mod submit;

pub use input::ReviewArgs;
pub use journals::{run_journals, run_register};
pub use pack::run_pack;
pub use status::{run_resolve, run_status};
pub use submit::{run_review, run_submit};
