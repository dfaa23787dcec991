//! `normalize` - print canonical forms

use anyhow::{Context, Result};
use chefkit::{normalize_run_list, normalize_structured};
use std::io::{self, Read};

/// Canonicalize a JSON object given inline or on stdin (`-`)
pub fn json(value: &str) -> Result<()> {
    let input = if value == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        value.to_string()
    };

    println!("{}", normalize_structured(&input));
    Ok(())
}

pub fn run_list(entries: &[String]) -> Result<()> {
    for entry in normalize_run_list(entries) {
        println!("{entry}");
    }
    Ok(())
}
