//! `gecos-assistant status` — is this workstation linked?

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::link_status;
use crate::commands::SystemAdapters;
use crate::output::json;

/// Run the status command. Reads the link record only; nothing is sent to
/// the Control Center.
///
/// # Errors
///
/// Returns an error if the link record exists but cannot be read.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let adapters = SystemAdapters::new(&app.config)?;
    let status = link_status(&adapters.links)?;
    if app.is_json() {
        println!("{}", json::format_status(&status)?);
    } else {
        app.renderer().render_status(&status);
    }
    Ok(ExitCode::SUCCESS)
}
