//! Attribute diffs over canonical values

use crate::attributes::{AttributeSet, RawAttribute};
use crate::normalize::{normalize_run_list_entry, normalize_structured_attr};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonicalization applied to a field before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StateFunc {
    /// Compare the value as given
    #[default]
    Identity,
    /// JSON object, see [`normalize_structured`](crate::normalize::normalize_structured)
    Structured,
    /// Run-list entry, see [`normalize_run_list_entry`]
    RunListEntry,
}

impl StateFunc {
    /// Canonical string for a value; `None` when the value is absent
    pub fn apply(&self, value: &RawAttribute) -> Option<String> {
        if value.is_absent() {
            return None;
        }
        Some(match self {
            StateFunc::Structured => normalize_structured_attr(value),
            StateFunc::Identity => plain(value),
            StateFunc::RunListEntry => normalize_run_list_entry(&plain(value)),
        })
    }
}

fn plain(value: &RawAttribute) -> String {
    match value {
        RawAttribute::String(s) => s.clone(),
        RawAttribute::Bool(b) => b.to_string(),
        RawAttribute::Absent => String::new(),
    }
}

/// A field whose canonical value changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDiff {
    pub name: String,
    pub state_func: StateFunc,
    pub old: Option<String>,
    pub new: Option<String>,
}

impl AttributeDiff {
    pub fn is_addition(&self) -> bool {
        self.old.is_none() && self.new.is_some()
    }

    pub fn is_removal(&self) -> bool {
        self.old.is_some() && self.new.is_none()
    }

    pub fn is_modification(&self) -> bool {
        self.old.is_some() && self.new.is_some()
    }
}

/// State functions per field name.
///
/// Flattened list elements (`run_list.0`) use the entry for their base
/// name (`run_list`).
#[derive(Debug, Clone, Default)]
pub struct StateFuncs {
    by_field: BTreeMap<String, StateFunc>,
}

impl StateFuncs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state function (builder style)
    pub fn with(mut self, field: &str, func: StateFunc) -> Self {
        self.by_field.insert(field.to_string(), func);
        self
    }

    pub fn insert(&mut self, field: &str, func: StateFunc) {
        self.by_field.insert(field.to_string(), func);
    }

    /// The state function for an attribute name
    pub fn for_attribute(&self, name: &str) -> StateFunc {
        let base = name.split('.').next().unwrap_or(name);
        self.by_field.get(base).copied().unwrap_or_default()
    }
}

/// Compare two attribute sets through their state functions.
///
/// Returns one diff per changed name, in name order.
pub fn diff_attributes(
    old: &AttributeSet,
    new: &AttributeSet,
    funcs: &StateFuncs,
) -> Vec<AttributeDiff> {
    let names: BTreeSet<&str> = old.names().chain(new.names()).collect();

    names
        .into_iter()
        .filter_map(|name| {
            let state_func = funcs.for_attribute(name);
            let before = state_func.apply(old.get(name));
            let after = state_func.apply(new.get(name));
            (before != after).then(|| AttributeDiff {
                name: name.to_string(),
                state_func,
                old: before,
                new: after,
            })
        })
        .collect()
}

/// Diff summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub additions: usize,
    pub removals: usize,
    pub modifications: usize,
}

impl DiffSummary {
    pub fn from_diffs(diffs: &[AttributeDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            if diff.is_addition() {
                summary.additions += 1;
            } else if diff.is_removal() {
                summary.removals += 1;
            } else {
                summary.modifications += 1;
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }

    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }
}
