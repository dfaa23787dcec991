//! Field validation
//!
//! Validators inspect one proposed value and report problems as
//! human-readable diagnostics. They never touch the network or the
//! filesystem.

use crate::error::{Error, Result};
use serde::Serialize;

/// Warnings and errors collected while validating configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Diagnostics {
    /// Create an empty set of diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Record an error
    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Append everything from another set
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    /// True when no errors were recorded (warnings are allowed)
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert into a `Result`, aggregating every error into one failure.
    ///
    /// Warnings are returned on success so the caller can surface them.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(Error::Validation {
                errors: self.errors,
            })
        }
    }
}

/// Validate a Chef server URL.
///
/// The transport appends resource paths directly onto this value, so it
/// must end with `/`.
pub fn validate_endpoint_url(value: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    if !value.ends_with('/') {
        diags.error(format!("Chef Server URL {value} must end with a slash"));
    }
    diags
}
