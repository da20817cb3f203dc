//! Typed errors for form-session boundaries.
//!
//! Typed errors allow pattern matching and policy-based handling at the
//! boundary between the form session and its host panel.

use thiserror::Error;

/// Errors surfaced by the form session and import parsing.
#[derive(Debug, Error)]
pub enum FormError {
    /// Submission was blocked by error-level validation issues.
    /// The message carries the first offending field for display.
    #[error("submission blocked: {errors} error(s), first: {first}")]
    Blocked { errors: usize, first: String },

    /// A share link could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A share link used a scheme this importer does not understand.
    #[error("unsupported link scheme: {0}")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_display_names_first_field() {
        let e = FormError::Blocked {
            errors: 2,
            first: "host".to_string(),
        };
        assert!(e.to_string().contains("host"));
        assert!(e.to_string().contains("2 error(s)"));
    }
}
