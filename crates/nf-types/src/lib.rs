//! nf-types: cross-crate stable contracts (issue codes, form errors).
//!
//! Codes emitted by the validator are a stable wire contract consumed by
//! the CLI report format; variants may be added but never renamed.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

mod errors;

pub use errors::FormError;

/// Stable issue codes used by node validation / CLI diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IssueCode {
    // ----- CLI / General -----
    CliInvalidArg,
    CliIoFail,
    // ----- Validation / Schema -----
    MissingRequired,
    InvalidEnum,
    OutOfRange,
    Conflict,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        use IssueCode::*;
        match self {
            CliInvalidArg => "CliInvalidArg",
            CliIoFail => "CliIoFail",
            MissingRequired => "MissingRequired",
            InvalidEnum => "InvalidEnum",
            OutOfRange => "OutOfRange",
            Conflict => "Conflict",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
