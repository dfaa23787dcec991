//! Client key resolution
//!
//! The client key can come from four places. Exactly one wins, in this
//! order:
//!
//! 1. the deprecated `private_key_pem` field
//! 2. the `key_material` field
//! 3. the file named by `CHEF_PRIVATE_KEY_FILE`
//! 4. the value of `CHEF_KEY_MATERIAL`
//!
//! The environment is only consulted when neither field is set. A key file
//! that is configured but unreadable is an error; it never falls through to
//! the next source.

use crate::env::{EnvLookup, FileReader};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding a path to a PEM key file
pub const ENV_PRIVATE_KEY_FILE: &str = "CHEF_PRIVATE_KEY_FILE";

/// Environment variable holding the key material itself
pub const ENV_KEY_MATERIAL: &str = "CHEF_KEY_MATERIAL";

/// Where a resolved credential came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CredentialSource {
    /// The deprecated `private_key_pem` field
    PrivateKeyPem,
    /// The `key_material` field
    KeyMaterial,
    /// A file named by `CHEF_PRIVATE_KEY_FILE`
    KeyFile { path: PathBuf },
    /// The `CHEF_KEY_MATERIAL` variable
    KeyMaterialEnv,
    /// No source supplied a value
    None,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::PrivateKeyPem => write!(f, "private_key_pem (deprecated)"),
            CredentialSource::KeyMaterial => write!(f, "key_material"),
            CredentialSource::KeyFile { path } => {
                write!(f, "{} ({})", ENV_PRIVATE_KEY_FILE, path.display())
            }
            CredentialSource::KeyMaterialEnv => write!(f, "{ENV_KEY_MATERIAL}"),
            CredentialSource::None => write!(f, "none"),
        }
    }
}

/// Explicitly supplied credential fields
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialInputs<'a> {
    pub private_key_pem: Option<&'a str>,
    pub key_material: Option<&'a str>,
}

/// A single effective client key and its provenance.
///
/// The key is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    key: String,
    source: CredentialSource,
}

impl ResolvedCredential {
    fn new(key: String, source: CredentialSource) -> Self {
        Self { key, source }
    }

    /// The credential used when no source supplied anything
    pub fn empty() -> Self {
        Self::new(String::new(), CredentialSource::None)
    }

    /// The key material (may be empty)
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("key", &format_args!("<redacted {} bytes>", self.key.len()))
            .field("source", &self.source)
            .finish()
    }
}

/// Pick the effective client key.
///
/// Only the key file read can fail. An absent credential is not an error;
/// the transport decides whether it needs one.
pub fn resolve_credential(
    inputs: &CredentialInputs<'_>,
    env: &dyn EnvLookup,
    files: &dyn FileReader,
) -> Result<ResolvedCredential> {
    let resolved = if let Some(pem) = non_empty(inputs.private_key_pem) {
        ResolvedCredential::new(pem.to_string(), CredentialSource::PrivateKeyPem)
    } else if let Some(material) = non_empty(inputs.key_material) {
        ResolvedCredential::new(material.to_string(), CredentialSource::KeyMaterial)
    } else if let Some(from_file) = read_key_file(env, files)? {
        from_file
    } else if let Some(material) = env.non_empty(ENV_KEY_MATERIAL) {
        ResolvedCredential::new(material, CredentialSource::KeyMaterialEnv)
    } else {
        ResolvedCredential::empty()
    };

    log::debug!("Client key resolved from {}", resolved.source());
    Ok(resolved)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn read_key_file(
    env: &dyn EnvLookup,
    files: &dyn FileReader,
) -> Result<Option<ResolvedCredential>> {
    let Some(raw_path) = env.non_empty(ENV_PRIVATE_KEY_FILE) else {
        return Ok(None);
    };

    let expanded = shellexpand::tilde_with_context(&raw_path, || env.non_empty("HOME"));
    let path = PathBuf::from(expanded.as_ref());

    let contents = files
        .read_to_string(&path)
        .map_err(|source| Error::CredentialSource {
            variable: ENV_PRIVATE_KEY_FILE,
            path: path.clone(),
            source,
        })?;

    if contents.is_empty() {
        log::debug!(
            "Key file {} is empty, falling back to {}",
            path.display(),
            ENV_KEY_MATERIAL
        );
        return Ok(None);
    }

    Ok(Some(ResolvedCredential::new(
        contents,
        CredentialSource::KeyFile { path },
    )))
}
