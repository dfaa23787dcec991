//! Provider configuration assembly
//!
//! Combines validated attributes and the resolved client key into the
//! immutable [`ProviderConfig`] handed to the API client.

use crate::attributes::{AttributeSet, ProviderAttributes};
use crate::credential::{ResolvedCredential, resolve_credential};
use crate::env::{EnvLookup, FileReader};
use crate::error::Result;
use std::time::Duration;

/// Request timeout for every API call. Not configurable.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Chef API client.
///
/// Built once per provider session and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    server_url: String,
    client_name: String,
    credential: ResolvedCredential,
    skip_ssl_verification: bool,
    timeout: Duration,
}

impl ProviderConfig {
    /// Base URL, always ending in `/`
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn credential(&self) -> &ResolvedCredential {
        &self.credential
    }

    /// True when TLS certificates should not be verified
    pub fn skip_ssl_verification(&self) -> bool {
        self.skip_ssl_verification
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join a resource-relative path onto the base URL
    pub fn endpoint(&self, relative: &str) -> String {
        format!("{}{}", self.server_url, relative.trim_start_matches('/'))
    }
}

/// Build the provider configuration, failing closed.
///
/// Every validation error is reported in one [`Error::Validation`]; a
/// broken credential source aborts afterwards. Deprecation warnings are
/// dropped; use [`build_config_with_warnings`] to surface them.
///
/// [`Error::Validation`]: crate::error::Error::Validation
pub fn build_config(
    attrs: &AttributeSet,
    env: &dyn EnvLookup,
    files: &dyn FileReader,
) -> Result<ProviderConfig> {
    build_config_with_warnings(attrs, env, files).map(|(config, _)| config)
}

/// Like [`build_config`], also returning non-fatal warnings
pub fn build_config_with_warnings(
    attrs: &AttributeSet,
    env: &dyn EnvLookup,
    files: &dyn FileReader,
) -> Result<(ProviderConfig, Vec<String>)> {
    let (settings, warnings) = ProviderAttributes::from_attributes(attrs, env)?;

    let credential = resolve_credential(&settings.credential_inputs(), env, files)?;
    if credential.is_empty() {
        log::info!("No client key configured; requests will be unsigned");
    }

    let config = ProviderConfig {
        server_url: settings.server_url,
        client_name: settings.client_name,
        credential,
        skip_ssl_verification: settings.allow_unverified_ssl,
        timeout: DEFAULT_TIMEOUT,
    };
    log::debug!(
        "Configured client {} for {}",
        config.client_name,
        config.server_url
    );

    Ok((config, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{CredentialSource, ENV_KEY_MATERIAL, ENV_PRIVATE_KEY_FILE};
    use crate::env::{FsReader, StaticEnv, StaticFiles};
    use crate::error::Error;
    use crate::schema::{ALLOW_UNVERIFIED_SSL, CLIENT_NAME, KEY_MATERIAL, PRIVATE_KEY_PEM, SERVER_URL};

    fn attrs() -> AttributeSet {
        AttributeSet::new()
            .with(SERVER_URL, "https://chef.example.com/organizations/acme/")
            .with(CLIENT_NAME, "terraform")
    }

    #[test]
    fn test_build_config() {
        let attrs = attrs()
            .with(KEY_MATERIAL, "KEY")
            .with(ALLOW_UNVERIFIED_SSL, true);
        let config = build_config(&attrs, &StaticEnv::new(), &StaticFiles::new()).unwrap();

        assert_eq!(
            config.server_url(),
            "https://chef.example.com/organizations/acme/"
        );
        assert_eq!(config.client_name(), "terraform");
        assert_eq!(config.credential().key(), "KEY");
        assert_eq!(config.credential().source(), &CredentialSource::KeyMaterial);
        assert!(config.skip_ssl_verification());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_ssl_verified_by_default() {
        let config = build_config(&attrs(), &StaticEnv::new(), &StaticFiles::new()).unwrap();
        assert!(!config.skip_ssl_verification());
        assert!(config.credential().is_empty());
    }

    #[test]
    fn test_invalid_url_fails() {
        let attrs = attrs().with(SERVER_URL, "https://chef.example.com");
        let err = build_config(&attrs, &StaticEnv::new(), &StaticFiles::new()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("must end with a slash"));
    }

    #[test]
    fn test_missing_field_and_bad_url_reported_together() {
        let attrs = AttributeSet::new().with(SERVER_URL, "https://chef.example.com");
        let err = build_config(&attrs, &StaticEnv::new(), &StaticFiles::new()).unwrap_err();
        match err {
            Error::Validation { errors } => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("client_name"));
                assert!(errors[1].contains("must end with a slash"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_file_fails_closed() {
        let env = StaticEnv::new()
            .with(ENV_PRIVATE_KEY_FILE, "/nonexistent/client.pem")
            .with(ENV_KEY_MATERIAL, "from-env");
        let result = build_config(&attrs(), &env, &FsReader);
        match result {
            Err(err) => assert!(err.is_credential_source()),
            Ok(config) => panic!("expected failure, got {config:?}"),
        }
    }

    #[test]
    fn test_validation_runs_before_credential_read() {
        let attrs = attrs().with(SERVER_URL, "https://chef.example.com");
        let env = StaticEnv::new().with(ENV_PRIVATE_KEY_FILE, "/nonexistent/client.pem");
        let err = build_config(&attrs, &env, &StaticFiles::new()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_deprecated_field_warning_is_returned() {
        let attrs = attrs().with(PRIVATE_KEY_PEM, "PEM").with(KEY_MATERIAL, "KEY");
        let (config, warnings) =
            build_config_with_warnings(&attrs, &StaticEnv::new(), &StaticFiles::new()).unwrap();
        assert_eq!(config.credential().key(), "PEM");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("private_key_pem"));
    }

    #[test]
    fn test_endpoint_join() {
        let config = build_config(&attrs(), &StaticEnv::new(), &StaticFiles::new()).unwrap();
        assert_eq!(
            config.endpoint("nodes/web01"),
            "https://chef.example.com/organizations/acme/nodes/web01"
        );
        assert_eq!(
            config.endpoint("/roles"),
            "https://chef.example.com/organizations/acme/roles"
        );
    }

    #[test]
    fn test_config_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProviderConfig>();
    }
}
