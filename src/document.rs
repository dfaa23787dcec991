//! Attribute documents
//!
//! Attributes are read from TOML (`.toml`) or JSON (anything else) and
//! flattened into the shape the provider framework stores:
//!
//! - scalars map directly (`null` is absent, numbers become their text)
//! - arrays become one attribute per element: `run_list.0`, `run_list.1`
//! - tables/objects become compact JSON text, so structured fields can be
//!   written inline

use anyhow::{Context, Result, bail};
use chefkit::{AttributeSet, RawAttribute};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load an attribute document
pub fn load(path: &Path) -> Result<AttributeSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let value: Value = if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON format in {}", path.display()))?
    };

    flatten(value).with_context(|| format!("Invalid attribute document {}", path.display()))
}

/// Load an attribute document, or an empty set if the file does not exist
pub fn load_or_default(path: &Path) -> Result<AttributeSet> {
    if !path.exists() {
        log::debug!("{} not found, using environment only", path.display());
        return Ok(AttributeSet::new());
    }
    load(path)
}

/// Flatten a top-level object into attributes
pub fn flatten(value: Value) -> Result<AttributeSet> {
    let Value::Object(object) = value else {
        bail!("attribute document must be an object or table");
    };

    let mut attrs = AttributeSet::new();
    for (name, value) in object {
        insert(&mut attrs, &name, value)?;
    }
    Ok(attrs)
}

fn insert(attrs: &mut AttributeSet, name: &str, value: Value) -> Result<()> {
    match value {
        Value::Null => attrs.insert(name, RawAttribute::Absent),
        Value::Bool(b) => attrs.insert(name, b),
        Value::Number(n) => attrs.insert(name, n.to_string()),
        Value::String(s) => attrs.insert(name, s),
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                insert(attrs, &format!("{name}.{i}"), item)?;
            }
        }
        Value::Object(object) => {
            let text = serde_json::to_string(&object)
                .with_context(|| format!("Could not serialize {name}"))?;
            attrs.insert(name, text);
        }
    }
    Ok(())
}
