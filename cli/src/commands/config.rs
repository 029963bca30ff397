//! `gecos-assistant config` — show the effective configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration path cannot be resolved.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    let path = app.config_store.path()?;
    match cmd {
        ConfigCommand::Show if app.is_json() => {
            let doc = serde_json::json!({
                "path": path,
                "config": app.config,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).context("JSON serialization failed")?
            );
        }
        ConfigCommand::Show => app.renderer().render_config(&app.config, &path),
        ConfigCommand::Path if app.is_json() => {
            println!("{}", serde_json::json!({ "path": path }));
        }
        ConfigCommand::Path => println!("{}", path.display()),
    }
    Ok(ExitCode::SUCCESS)
}
