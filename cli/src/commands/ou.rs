//! `gecos-assistant ou` — organizational unit lookups.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::search_organizational_units;
use crate::commands::connect::AccessArgs;
use crate::commands::{SystemAdapters, load_record};
use crate::output::json;

/// OU subcommands.
#[derive(Subcommand)]
pub enum OuCommand {
    /// Search organizational units by name
    Search {
        /// Text to search for
        text: String,

        #[command(flatten)]
        access: AccessArgs,
    },
}

/// Run the ou command.
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the server answers
/// with anything but a list.
pub async fn run(app: &AppContext, cmd: OuCommand) -> Result<ExitCode> {
    match cmd {
        OuCommand::Search { text, access } => search(app, &text, &access).await,
    }
}

async fn search(app: &AppContext, text: &str, access: &AccessArgs) -> Result<ExitCode> {
    let adapters = SystemAdapters::new(&app.config)?;
    let record = load_record(&adapters.links);
    let access = access.resolve(record.as_ref(), !app.non_interactive)?;

    let ous = search_organizational_units(&adapters.directory, &access, text).await?;
    if app.is_json() {
        println!("{}", json::format_ous(&ous)?);
    } else {
        app.renderer().render_ous(&ous);
    }
    Ok(ExitCode::SUCCESS)
}
