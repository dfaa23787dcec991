mod cli;
mod commands;
mod document;
mod paths;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, NormalizeCommand};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Configure(args) => commands::configure::run(&ctx, args),
        Command::ValidateUrl { url } => commands::validate::run(&ctx, &url),
        Command::Normalize(cmd) => match cmd {
            NormalizeCommand::Json { value } => commands::normalize::json(&value),
            NormalizeCommand::RunList { entries } => commands::normalize::run_list(&entries),
        },
        Command::Plan(args) => commands::plan::run(&ctx, args),
        Command::Schema => commands::schema::run(&ctx),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "chefprov", &mut io::stdout());
            Ok(())
        }
    }
}
