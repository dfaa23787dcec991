//! `plan` - preview attribute changes after normalization
//!
//! Compares a recorded attribute document with a desired one the way the
//! provider's diff engine does, so bare run-list entries and reordered JSON
//! do not show up as changes.

use anyhow::Result;
use chefkit::{AttributeDiff, AttributeSet, DiffSummary, StateFunc, StateFuncs, diff_attributes};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use crate::Context;
use crate::cli::PlanArgs;
use crate::document;
use crate::ui;

pub fn run(ctx: &Context, args: PlanArgs) -> Result<()> {
    let old = document::load(&args.old)?;
    let new = document::load(&args.new)?;

    let funcs = state_funcs(&old, &new, &args.structured, &args.run_list);
    let diffs = diff_attributes(&old, &new, &funcs);

    display_diffs(&diffs);

    let summary = DiffSummary::from_diffs(&diffs);
    if summary.has_changes() {
        println!(
            "  {} to add, {} to change, {} to remove",
            summary.additions.to_string().green(),
            summary.modifications.to_string().yellow(),
            summary.removals.to_string().red()
        );
    }

    if ctx.verbose > 0 {
        let total = old.names().chain(new.names()).count();
        ui::dim(&format!("{} attributes compared", total));
    }
    println!();
    Ok(())
}

/// Pick a state function for every field.
///
/// Explicit flags win; otherwise `*_json` fields are structured and
/// `run_list` is a run list.
fn state_funcs(
    old: &AttributeSet,
    new: &AttributeSet,
    structured: &[String],
    run_list: &[String],
) -> StateFuncs {
    let mut funcs = StateFuncs::new();

    for name in old.names().chain(new.names()) {
        let base = name.split('.').next().unwrap_or(name);
        if base.ends_with("_json") {
            funcs.insert(base, StateFunc::Structured);
        } else if base == "run_list" {
            funcs.insert(base, StateFunc::RunListEntry);
        }
    }
    for field in structured {
        funcs.insert(field, StateFunc::Structured);
    }
    for field in run_list {
        funcs.insert(field, StateFunc::RunListEntry);
    }
    funcs
}

fn display_diffs(diffs: &[AttributeDiff]) {
    if diffs.is_empty() {
        println!();
        println!("  {} No changes. Attributes match after normalization.", "✓".green());
        return;
    }

    ui::section("Attribute changes");
    for diff in diffs {
        let symbol = if diff.is_addition() {
            "+".green()
        } else if diff.is_removal() {
            "-".red()
        } else {
            "~".yellow()
        };

        match (&diff.old, &diff.new) {
            (Some(old), Some(new)) if diff.state_func == StateFunc::Structured => {
                println!("  {} {}", symbol, diff.name.bold());
                show_structured_diff(old, new);
            }
            (old, new) => println!(
                "  {} {}: {} → {}",
                symbol,
                diff.name.bold(),
                display_value(old.as_deref()).dimmed(),
                display_value(new.as_deref())
            ),
        }
    }
    println!();
}

fn display_value(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => "(absent)".to_string(),
    }
}

/// Line diff of two canonical JSON documents, pretty-printed
fn show_structured_diff(old: &str, new: &str) {
    let old = pretty(old);
    let new = pretty(new);
    let diff = TextDiff::from_lines(&old, &new);

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("      {}", format!("- {change}").red()),
            ChangeTag::Insert => print!("      {}", format!("+ {change}").green()),
            ChangeTag::Equal => {}
        }
    }
}

fn pretty(canonical: &str) -> String {
    let text = serde_json::from_str::<serde_json::Value>(canonical)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| canonical.to_string());
    text + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_funcs_defaults() {
        let old = AttributeSet::new()
            .with("default_attributes_json", "{}")
            .with("run_list.0", "base");
        let new = AttributeSet::new().with("name", "web");

        let funcs = state_funcs(&old, &new, &[], &[]);
        assert_eq!(
            funcs.for_attribute("default_attributes_json"),
            StateFunc::Structured
        );
        assert_eq!(funcs.for_attribute("run_list.0"), StateFunc::RunListEntry);
        assert_eq!(funcs.for_attribute("name"), StateFunc::Identity);
    }

    #[test]
    fn test_state_funcs_flags() {
        let old = AttributeSet::new().with("content", "{}");
        let funcs = state_funcs(
            &old,
            &AttributeSet::new(),
            &["content".to_string()],
            &["recipes".to_string()],
        );
        assert_eq!(funcs.for_attribute("content"), StateFunc::Structured);
        assert_eq!(funcs.for_attribute("recipes.2"), StateFunc::RunListEntry);
    }

    #[test]
    fn test_pretty() {
        assert_eq!(pretty(r#"{"a":1}"#), "{\n  \"a\": 1\n}\n");
        assert_eq!(pretty("null"), "null\n");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "(absent)");
        assert_eq!(display_value(Some("recipe[x]")), "\"recipe[x]\"");
    }
}
