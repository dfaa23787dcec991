//! `validate-url` - check a server URL without contacting it

use anyhow::{Result, bail};
use chefkit::validate_endpoint_url;

use crate::Context;
use crate::ui;

pub fn run(ctx: &Context, url: &str) -> Result<()> {
    let diags = validate_endpoint_url(url);

    for warning in &diags.warnings {
        ui::warn(warning);
    }
    for error in &diags.errors {
        ui::error(error);
    }

    if !diags.is_ok() {
        bail!("{} is not a valid Chef server URL", url);
    }

    if !ctx.quiet {
        ui::success(&format!("{url} is a valid Chef server URL"));
    }
    Ok(())
}
