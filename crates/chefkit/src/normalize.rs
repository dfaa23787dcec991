//! State normalization
//!
//! Values stored in state are compared as strings across refreshes. These
//! functions rewrite a value into a canonical form so equivalent inputs
//! never show up as a change. Both are idempotent.

use crate::attributes::RawAttribute;
use serde_json::{Map, Value};

/// Canonical form of a structured value that could not be parsed
pub const NO_VALUE: &str = "null";

/// Qualifier the Chef server puts on bare run-list entries
pub const DEFAULT_RUN_LIST_QUALIFIER: &str = "recipe";

/// Canonicalize a JSON object.
///
/// Keys are sorted at every level and all insignificant whitespace is
/// dropped. Anything that is not a JSON object becomes [`NO_VALUE`]; the
/// strict check happens when the value is first accepted, so this never
/// fails.
pub fn normalize_structured(value: &str) -> String {
    match serde_json::from_str::<Map<String, Value>>(value) {
        Ok(object) => serde_json::to_string(&object).unwrap_or_else(|_| NO_VALUE.to_string()),
        Err(e) => {
            log::debug!("Structured value did not parse ({e}), using {NO_VALUE}");
            NO_VALUE.to_string()
        }
    }
}

/// [`normalize_structured`] for an untyped attribute; non-strings become
/// [`NO_VALUE`].
pub fn normalize_structured_attr(value: &RawAttribute) -> String {
    match value {
        RawAttribute::String(s) => normalize_structured(s),
        _ => NO_VALUE.to_string(),
    }
}

/// Qualify a bare run-list entry.
///
/// `"foo"` and `"recipe[foo]"` name the same recipe, and the server always
/// answers with the qualified form. Anything containing `[` is returned
/// as-is; bracket balance and an empty name are not checked.
pub fn normalize_run_list_entry(value: &str) -> String {
    if value.contains('[') {
        value.to_string()
    } else {
        format!("{DEFAULT_RUN_LIST_QUALIFIER}[{value}]")
    }
}

/// Normalize every entry of a run list, keeping order
pub fn normalize_run_list<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .map(|e| normalize_run_list_entry(e.as_ref()))
        .collect()
}
