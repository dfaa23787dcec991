//! Provider field declarations

use crate::credential::{ENV_KEY_MATERIAL, ENV_PRIVATE_KEY_FILE};
use serde::Serialize;
use std::fmt;

pub const SERVER_URL: &str = "server_url";
pub const CLIENT_NAME: &str = "client_name";
pub const PRIVATE_KEY_PEM: &str = "private_key_pem";
pub const KEY_MATERIAL: &str = "key_material";
pub const ALLOW_UNVERIFIED_SSL: &str = "allow_unverified_ssl";

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    String,
    Bool,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Bool => write!(f, "boolean"),
        }
    }
}

/// Where a field's value comes from when it is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnvDefault {
    /// No fallback
    None,
    /// The value of an environment variable
    Var(&'static str),
    /// The contents of the file named by an environment variable
    File(&'static str),
}

impl EnvDefault {
    /// The variable name, if any
    pub fn var_name(&self) -> Option<&'static str> {
        match self {
            EnvDefault::None => None,
            EnvDefault::Var(name) | EnvDefault::File(name) => Some(name),
        }
    }
}

/// Declaration of one provider field
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub env_default: EnvDefault,
    /// Deprecation notice shown when the field is set
    pub deprecated: Option<&'static str>,
    pub description: &'static str,
}

/// Every field the provider accepts
pub const PROVIDER_FIELDS: &[FieldSchema] = &[
    FieldSchema {
        name: SERVER_URL,
        kind: FieldKind::String,
        required: true,
        env_default: EnvDefault::Var("CHEF_SERVER_URL"),
        deprecated: None,
        description: "URL of the root of the target Chef server or organization.",
    },
    FieldSchema {
        name: CLIENT_NAME,
        kind: FieldKind::String,
        required: true,
        env_default: EnvDefault::Var("CHEF_CLIENT_NAME"),
        deprecated: None,
        description: "Name of a registered client within the Chef server.",
    },
    FieldSchema {
        name: PRIVATE_KEY_PEM,
        kind: FieldKind::String,
        required: false,
        env_default: EnvDefault::File(ENV_PRIVATE_KEY_FILE),
        deprecated: Some("Please use key_material instead"),
        description: "PEM-formatted private key for client authentication.",
    },
    FieldSchema {
        name: KEY_MATERIAL,
        kind: FieldKind::String,
        required: false,
        env_default: EnvDefault::Var(ENV_KEY_MATERIAL),
        deprecated: None,
        description: "Private key material for client authentication.",
    },
    FieldSchema {
        name: ALLOW_UNVERIFIED_SSL,
        kind: FieldKind::Bool,
        required: false,
        env_default: EnvDefault::None,
        deprecated: None,
        description: "If set, the Chef client will permit unverifiable SSL certificates.",
    },
];

/// Look up a field declaration by name
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    PROVIDER_FIELDS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let url = field(SERVER_URL).unwrap();
        assert!(url.required);
        assert_eq!(url.env_default.var_name(), Some("CHEF_SERVER_URL"));

        let pem = field(PRIVATE_KEY_PEM).unwrap();
        assert!(pem.deprecated.is_some());
        assert_eq!(pem.env_default, EnvDefault::File(ENV_PRIVATE_KEY_FILE));

        assert!(field("nope").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in PROVIDER_FIELDS.iter().enumerate() {
            for b in &PROVIDER_FIELDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
