//! Untyped attributes and the typed provider view of them
//!
//! The host framework hands over values by name with no static type.
//! [`ProviderAttributes::from_attributes`] is the only place that inspects
//! those runtime types; everything downstream works with plain fields.

use crate::credential::CredentialInputs;
use crate::env::EnvLookup;
use crate::error::Result;
use crate::schema::{
    self, ALLOW_UNVERIFIED_SSL, CLIENT_NAME, EnvDefault, FieldKind, KEY_MATERIAL, PRIVATE_KEY_PEM,
    SERVER_URL,
};
use crate::validate::{Diagnostics, validate_endpoint_url};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value supplied by the user or read back from remote state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAttribute {
    Bool(bool),
    String(String),
    #[default]
    Absent,
}

impl RawAttribute {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawAttribute::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawAttribute::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawAttribute::Absent)
    }

    /// True for absent values and for the zero value of each type
    /// (`""` and `false`)
    pub fn is_zero(&self) -> bool {
        match self {
            RawAttribute::Bool(b) => !b,
            RawAttribute::String(s) => s.is_empty(),
            RawAttribute::Absent => true,
        }
    }
}

impl From<&str> for RawAttribute {
    fn from(value: &str) -> Self {
        RawAttribute::String(value.to_string())
    }
}

impl From<String> for RawAttribute {
    fn from(value: String) -> Self {
        RawAttribute::String(value)
    }
}

impl From<bool> for RawAttribute {
    fn from(value: bool) -> Self {
        RawAttribute::Bool(value)
    }
}

static ABSENT: RawAttribute = RawAttribute::Absent;

/// Attributes keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: BTreeMap<String, RawAttribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute (builder style)
    pub fn with(mut self, name: &str, value: impl Into<RawAttribute>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<RawAttribute>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Get an attribute; missing names read as [`RawAttribute::Absent`]
    pub fn get(&self, name: &str) -> &RawAttribute {
        self.values.get(name).unwrap_or(&ABSENT)
    }

    /// Get an attribute only if it is set to a non-zero value
    pub fn get_ok(&self, name: &str) -> Option<&RawAttribute> {
        self.values.get(name).filter(|v| !v.is_zero())
    }

    /// Iterate in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawAttribute)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawAttribute)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, RawAttribute)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Typed provider settings read from an [`AttributeSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttributes {
    pub server_url: String,
    pub client_name: String,
    pub private_key_pem: Option<String>,
    pub key_material: Option<String>,
    pub allow_unverified_ssl: bool,
}

impl ProviderAttributes {
    /// Translate untyped attributes into provider settings.
    ///
    /// Required fields fall back to their environment default. Credential
    /// fields are taken as-is; their environment fallbacks belong to
    /// [`resolve_credential`](crate::credential::resolve_credential).
    ///
    /// Every problem is collected before failing: missing fields, wrong
    /// types and a malformed server URL all end up in one
    /// [`Error::Validation`](crate::error::Error::Validation). On success the
    /// deprecation notices are returned as warnings.
    pub fn from_attributes(
        attrs: &AttributeSet,
        env: &dyn EnvLookup,
    ) -> Result<(Self, Vec<String>)> {
        let mut diags = Diagnostics::new();

        let server_url = required_string(attrs, SERVER_URL, env, &mut diags);
        let client_name = required_string(attrs, CLIENT_NAME, env, &mut diags);
        let private_key_pem = optional_string(attrs, PRIVATE_KEY_PEM, &mut diags);
        let key_material = optional_string(attrs, KEY_MATERIAL, &mut diags);

        let allow_unverified_ssl = match attrs.get(ALLOW_UNVERIFIED_SSL) {
            RawAttribute::Bool(b) => *b,
            RawAttribute::Absent => false,
            RawAttribute::String(_) => {
                diags.error(type_message(ALLOW_UNVERIFIED_SSL, FieldKind::Bool));
                false
            }
        };

        if let Some(url) = &server_url {
            diags.merge(validate_endpoint_url(url));
        }

        let set_fields = [
            (PRIVATE_KEY_PEM, private_key_pem.is_some()),
            (KEY_MATERIAL, key_material.is_some()),
        ];
        for (name, _) in set_fields.iter().filter(|(_, is_set)| *is_set) {
            if let Some(notice) = schema::field(name).and_then(|f| f.deprecated) {
                log::debug!("{name} is set but deprecated");
                diags.warn(format!("\"{name}\" is deprecated: {notice}"));
            }
        }

        let warnings = diags.into_result()?;

        // No errors means both required fields resolved
        let settings = Self {
            server_url: server_url.unwrap_or_default(),
            client_name: client_name.unwrap_or_default(),
            private_key_pem,
            key_material,
            allow_unverified_ssl,
        };
        Ok((settings, warnings))
    }

    /// The explicitly supplied credential fields
    pub fn credential_inputs(&self) -> CredentialInputs<'_> {
        CredentialInputs {
            private_key_pem: self.private_key_pem.as_deref(),
            key_material: self.key_material.as_deref(),
        }
    }
}

fn type_message(name: &str, expected: FieldKind) -> String {
    format!("attribute \"{name}\" must be a {expected}")
}

fn missing_message(name: &str, env: Option<&str>) -> String {
    match env {
        Some(var) => format!("attribute \"{name}\" is required (or set {var})"),
        None => format!("attribute \"{name}\" is required"),
    }
}

fn optional_string(attrs: &AttributeSet, name: &str, diags: &mut Diagnostics) -> Option<String> {
    match attrs.get(name) {
        RawAttribute::String(s) if !s.is_empty() => Some(s.clone()),
        RawAttribute::String(_) | RawAttribute::Absent => None,
        RawAttribute::Bool(_) => {
            diags.error(type_message(name, FieldKind::String));
            None
        }
    }
}

fn required_string(
    attrs: &AttributeSet,
    name: &str,
    env: &dyn EnvLookup,
    diags: &mut Diagnostics,
) -> Option<String> {
    if attrs.get(name).as_bool().is_some() {
        diags.error(type_message(name, FieldKind::String));
        return None;
    }
    if let Some(value) = optional_string(attrs, name, diags) {
        return Some(value);
    }

    let env_var = schema::field(name).and_then(|f| match f.env_default {
        EnvDefault::Var(var) => Some(var),
        _ => None,
    });

    if let Some(value) = env_var.and_then(|var| env.non_empty(var)) {
        log::debug!("Using {name} from environment");
        return Some(value);
    }

    diags.error(missing_message(name, env_var));
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnv;
    use crate::error::Error;

    fn base() -> AttributeSet {
        AttributeSet::new()
            .with(SERVER_URL, "https://chef.example.com/organizations/acme/")
            .with(CLIENT_NAME, "terraform")
    }

    #[test]
    fn test_get_and_get_ok() {
        let attrs = AttributeSet::new()
            .with("name", "web")
            .with("empty", "")
            .with("off", false)
            .with("on", true);

        assert_eq!(attrs.get("name").as_str(), Some("web"));
        assert!(attrs.get("missing").is_absent());

        assert!(attrs.get_ok("name").is_some());
        assert!(attrs.get_ok("on").is_some());
        assert!(attrs.get_ok("empty").is_none());
        assert!(attrs.get_ok("off").is_none());
        assert!(attrs.get_ok("missing").is_none());
    }

    #[test]
    fn test_deserialize_from_json() {
        let attrs: AttributeSet = serde_json::from_str(
            r#"{"server_url": "https://chef/", "allow_unverified_ssl": true, "key_material": null}"#,
        )
        .unwrap();
        assert_eq!(attrs.get(SERVER_URL).as_str(), Some("https://chef/"));
        assert_eq!(attrs.get(ALLOW_UNVERIFIED_SSL).as_bool(), Some(true));
        assert!(attrs.get(KEY_MATERIAL).is_absent());
        assert_eq!(attrs.len(), 3);
    }

    fn parse(attrs: &AttributeSet, env: &StaticEnv) -> ProviderAttributes {
        let (parsed, _) = ProviderAttributes::from_attributes(attrs, env).unwrap();
        parsed
    }

    fn errors(attrs: &AttributeSet, env: &StaticEnv) -> Vec<String> {
        match ProviderAttributes::from_attributes(attrs, env) {
            Err(Error::Validation { errors }) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_attributes() {
        let attrs = base()
            .with(KEY_MATERIAL, "KEY")
            .with(ALLOW_UNVERIFIED_SSL, true);
        let (parsed, warnings) =
            ProviderAttributes::from_attributes(&attrs, &StaticEnv::new()).unwrap();

        assert_eq!(
            parsed.server_url,
            "https://chef.example.com/organizations/acme/"
        );
        assert_eq!(parsed.client_name, "terraform");
        assert_eq!(parsed.key_material.as_deref(), Some("KEY"));
        assert_eq!(parsed.private_key_pem, None);
        assert!(parsed.allow_unverified_ssl);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_required_fields_use_env_defaults() {
        let env = StaticEnv::new()
            .with("CHEF_SERVER_URL", "https://env.example.com/")
            .with("CHEF_CLIENT_NAME", "env-client");
        let parsed = parse(&AttributeSet::new(), &env);
        assert_eq!(parsed.server_url, "https://env.example.com/");
        assert_eq!(parsed.client_name, "env-client");
        assert!(!parsed.allow_unverified_ssl);
    }

    #[test]
    fn test_explicit_value_beats_env_default() {
        let env = StaticEnv::new().with("CHEF_SERVER_URL", "https://env.example.com/");
        let parsed = parse(&base(), &env);
        assert_eq!(
            parsed.server_url,
            "https://chef.example.com/organizations/acme/"
        );
    }

    #[test]
    fn test_missing_required_field() {
        let attrs = AttributeSet::new().with(SERVER_URL, "https://chef/");
        assert_eq!(
            errors(&attrs, &StaticEnv::new()),
            vec!["attribute \"client_name\" is required (or set CHEF_CLIENT_NAME)".to_string()]
        );
    }

    #[test]
    fn test_wrong_types() {
        let attrs = base().with(ALLOW_UNVERIFIED_SSL, "yes");
        assert_eq!(
            errors(&attrs, &StaticEnv::new()),
            vec!["attribute \"allow_unverified_ssl\" must be a boolean".to_string()]
        );

        let attrs = base().with(KEY_MATERIAL, true);
        assert_eq!(
            errors(&attrs, &StaticEnv::new()),
            vec!["attribute \"key_material\" must be a string".to_string()]
        );
    }

    #[test]
    fn test_wrong_type_for_required_field_skips_env_default() {
        let env = StaticEnv::new().with("CHEF_CLIENT_NAME", "env-client");
        let attrs = base().with(CLIENT_NAME, true);
        assert_eq!(
            errors(&attrs, &env),
            vec!["attribute \"client_name\" must be a string".to_string()]
        );
    }

    #[test]
    fn test_all_problems_reported_together() {
        let attrs = AttributeSet::new()
            .with(SERVER_URL, "https://chef.example.com")
            .with(ALLOW_UNVERIFIED_SSL, "yes")
            .with(PRIVATE_KEY_PEM, "PEM");
        let errors = errors(&attrs, &StaticEnv::new());
        assert_eq!(
            errors,
            vec![
                "attribute \"client_name\" is required (or set CHEF_CLIENT_NAME)".to_string(),
                "attribute \"allow_unverified_ssl\" must be a boolean".to_string(),
                "Chef Server URL https://chef.example.com must end with a slash".to_string(),
            ]
        );
    }

    #[test]
    fn test_url_checked_after_env_default() {
        let env = StaticEnv::new().with("CHEF_SERVER_URL", "https://env.example.com");
        let attrs = AttributeSet::new().with(CLIENT_NAME, "terraform");
        let errors = errors(&attrs, &env);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("https://env.example.com must end with a slash"));
    }

    #[test]
    fn test_deprecated_field_warns_once() {
        let attrs = base().with(PRIVATE_KEY_PEM, "PEM");
        let (parsed, warnings) =
            ProviderAttributes::from_attributes(&attrs, &StaticEnv::new()).unwrap();
        assert_eq!(parsed.credential_inputs().private_key_pem, Some("PEM"));
        assert_eq!(
            warnings,
            vec!["\"private_key_pem\" is deprecated: Please use key_material instead".to_string()]
        );
    }

    #[test]
    fn test_credential_env_not_applied_by_adapter() {
        let env = StaticEnv::new().with("CHEF_KEY_MATERIAL", "from-env");
        let parsed = parse(&base(), &env);
        assert_eq!(parsed.key_material, None);
    }
}
