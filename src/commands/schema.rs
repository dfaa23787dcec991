//! `schema` - list provider fields

use anyhow::Result;
use chefkit::{EnvDefault, FieldSchema, PROVIDER_FIELDS};
use colored::Colorize;

use crate::Context;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    ui::header("Provider Fields");

    for field in PROVIDER_FIELDS {
        let marker = if field.required {
            "required".red()
        } else {
            "optional".dimmed()
        };
        println!();
        println!("  {} ({}, {})", field.name.bold(), field.kind, marker);
        if !ctx.quiet {
            ui::dim(field.description);
        }
        if let Some(default) = default_text(field) {
            ui::kv("default", &default);
        }
        if let Some(notice) = field.deprecated {
            ui::kv("deprecated", notice);
        }
    }
    println!();
    Ok(())
}

fn default_text(field: &FieldSchema) -> Option<String> {
    match field.env_default {
        EnvDefault::None => None,
        EnvDefault::Var(var) => Some(format!("${var}")),
        EnvDefault::File(var) => Some(format!("contents of the file named by ${var}")),
    }
}
