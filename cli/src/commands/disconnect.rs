//! `gecos-assistant disconnect` — unlink this workstation.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::{Collaborators, WorkflowOptions, disconnect};
use crate::commands::connect::{LinkArgs, render};
use crate::commands::{SystemAdapters, exit_code, load_record};
use crate::infra::assets::EmbeddedTemplates;
use crate::output::TerminalReporter;
use crate::output::prompt::TerminalCertificatePrompt;

/// Run the disconnect command.
///
/// The node name comes from `--node-name` or the link record; without
/// either, it is derived from the network like on connect.
///
/// # Errors
///
/// Returns an error if the adapters cannot be built or a prompt fails.
pub async fn run(app: &AppContext, args: LinkArgs) -> Result<ExitCode> {
    let adapters = SystemAdapters::new(&app.config)?;
    let record = load_record(&adapters.links);
    if record.is_none() && !app.is_json() {
        app.output
            .warn("No link record found; this workstation may not be linked.");
    }
    let request = args.resolve(record.as_ref(), !app.non_interactive)?;

    if !app.confirm("Unlink this workstation from GECOS CC?", true)? {
        return Ok(ExitCode::from(super::EXIT_CANCELED));
    }

    let reporter = TerminalReporter::new(&app.output, !app.is_json());
    let prompt = TerminalCertificatePrompt::new(&reporter, args.cert_url, !app.non_interactive);
    let ports = Collaborators {
        directory: &adapters.directory,
        runner: &adapters.runner,
        inventory: &adapters.inventory,
        files: &adapters.files,
        links: &adapters.links,
        templates: &EmbeddedTemplates,
        prompt: &prompt,
    };
    let opts = WorkflowOptions {
        reporter: &reporter,
        config: &app.config,
        home_dir: None,
    };

    let report = disconnect(&ports, &opts, &request.access, &request.workstation).await;
    render(app, &report)?;
    Ok(exit_code(&report))
}
