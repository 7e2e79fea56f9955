//! Workflow version tokens
//!
//! The service labels every revision document with a dotted four-segment
//! token `<step>.<major>.<minor>.<revision>`. Only single digits carry
//! meaning: the leading digit of the token is the editorial workflow step,
//! and the trailing digit flags whether the document is the original
//! artifact of that step (`0`) or a later revision. `14.0.0.0` is therefore
//! step 1, and `3.0.0.10` is an original.

use crate::error::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Workflow step of the copyediting stage
pub const COPYEDITING_STEP: u32 = 4;

/// Parsed version token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionToken {
    step: u32,
    major: u32,
    minor: u32,
    revision: u32,
}

impl VersionToken {
    /// Build a token from its four segments
    pub const fn new(step: u32, major: u32, minor: u32, revision: u32) -> Self {
        Self {
            step,
            major,
            minor,
            revision,
        }
    }

    /// Workflow step, the leading digit of the token
    pub const fn step(self) -> u32 {
        let mut lead = self.step;
        while lead >= 10 {
            lead /= 10;
        }
        lead
    }

    /// Revision flag, the trailing digit of the token
    pub const fn revision_flag(self) -> u32 {
        self.revision % 10
    }

    /// Original (non-revision) copy of its step
    pub const fn is_original(self) -> bool {
        self.revision_flag() == 0
    }

    /// Document is in the copyediting step
    pub const fn is_copyediting(self) -> bool {
        self.step == COPYEDITING_STEP
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$")
            .expect("hardcoded version pattern is valid")
    })
}

impl FromStr for VersionToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = token_pattern()
            .captures(s)
            .ok_or_else(|| Error::InvalidVersion(s.to_string()))?;

        let segment = |i: usize| -> Result<u32, Error> {
            caps[i]
                .parse()
                .map_err(|_| Error::InvalidVersion(s.to_string()))
        };

        Ok(Self {
            step: segment(1)?,
            major: segment(2)?,
            minor: segment(3)?,
            revision: segment(4)?,
        })
    }
}

impl TryFrom<String> for VersionToken {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionToken> for String {
    fn from(token: VersionToken) -> Self {
        token.to_string()
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.step, self.major, self.minor, self.revision
        )
    }
}
