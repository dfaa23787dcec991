//! Error types for provider configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a provider configuration.
///
/// Normalization never fails: malformed values degrade to
/// [`NO_VALUE`](crate::normalize::NO_VALUE) instead of producing an error.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more fields failed validation
    #[error("invalid provider configuration: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// A credential file was configured but could not be read
    #[error("failed to read credential file {} (from {variable}): {source}", .path.display())]
    CredentialSource {
        variable: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns true if this error came from field validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true if a configured credential source was broken
    pub fn is_credential_source(&self) -> bool {
        matches!(self, Error::CredentialSource { .. })
    }
}

/// Result type for provider configuration operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let invalid = Error::Validation {
            errors: vec!["bad".to_string()],
        };
        assert!(invalid.is_validation());
        assert!(!invalid.is_credential_source());

        let unreadable = Error::CredentialSource {
            variable: "CHEF_PRIVATE_KEY_FILE",
            path: PathBuf::from("/missing.pem"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(unreadable.is_credential_source());
        assert!(!unreadable.is_validation());
    }

    #[test]
    fn test_error_messages() {
        let invalid = Error::Validation {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            invalid.to_string(),
            "invalid provider configuration: first; second"
        );
    }
}
