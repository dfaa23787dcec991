//! `configure` - build the provider configuration from attributes + environment

use anyhow::{Context as AnyhowContext, Result};
use chefkit::{CredentialSource, FsReader, ProcessEnv, ProviderConfig};
use serde::Serialize;

use crate::Context;
use crate::cli::ConfigureArgs;
use crate::document;
use crate::paths;
use crate::ui;

/// What `configure --json` prints. Never includes the key itself.
#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    server_url: &'a str,
    client_name: &'a str,
    credential_source: &'a CredentialSource,
    has_key: bool,
    skip_ssl_verification: bool,
    timeout_secs: u64,
    warnings: &'a [String],
}

impl<'a> ConfigReport<'a> {
    fn new(config: &'a ProviderConfig, warnings: &'a [String]) -> Self {
        Self {
            server_url: config.server_url(),
            client_name: config.client_name(),
            credential_source: config.credential().source(),
            has_key: !config.credential().is_empty(),
            skip_ssl_verification: config.skip_ssl_verification(),
            timeout_secs: config.timeout().as_secs(),
            warnings,
        }
    }
}

pub fn run(ctx: &Context, args: ConfigureArgs) -> Result<()> {
    let attrs = match &args.file {
        Some(path) => document::load(path)?,
        None => document::load_or_default(&paths::default_attributes_file()?)?,
    };

    let (config, warnings) = chefkit::build_config_with_warnings(&attrs, &ProcessEnv, &FsReader)
        .context("Failed to configure the Chef provider")?;

    if args.json {
        let report = ConfigReport::new(&config, &warnings);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for warning in &warnings {
        ui::warn(warning);
    }

    if !ctx.quiet {
        ui::header("Provider Configuration");
        ui::kv("Server URL", config.server_url());
        ui::kv("Client", config.client_name());
        ui::kv("Client key", &ui::redact(config.credential().key()));
        ui::kv("Key source", &config.credential().source().to_string());
        ui::kv(
            "Verify SSL",
            if config.skip_ssl_verification() {
                "no"
            } else {
                "yes"
            },
        );
        ui::kv("Timeout", &format!("{}s", config.timeout().as_secs()));
        println!();
    }

    ui::success("Provider configuration is valid");
    Ok(())
}
