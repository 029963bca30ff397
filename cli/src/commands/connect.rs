//! `gecos-assistant connect` — link this workstation to a Control Center.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use gecos_common::LinkRecord;

use crate::app::AppContext;
use crate::application::services::{Collaborators, WorkflowOptions, connect};
use crate::commands::{SystemAdapters, exit_code, load_record};
use crate::domain::access::AccessData;
use crate::domain::step::PipelineReport;
use crate::domain::workstation::WorkstationData;
use crate::infra::assets::EmbeddedTemplates;
use crate::output::json;
use crate::output::prompt::{TerminalCertificatePrompt, password_or_prompt, text_or_prompt};
use crate::output::TerminalReporter;

/// Control Center access flags.
#[derive(Args, Debug, Default)]
pub struct AccessArgs {
    /// Control Center URL
    #[arg(long, env = "GECOS_CC_URL")]
    pub url: Option<String>,

    /// Control Center username
    #[arg(long, env = "GECOS_CC_LOGIN")]
    pub login: Option<String>,

    /// Control Center password
    #[arg(long, env = "GECOS_CC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl AccessArgs {
    /// Fills gaps from `record`, then asks for whatever is still missing.
    /// The password is never stored, so it is always a flag or a prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if an interactive prompt fails.
    pub(crate) fn resolve(
        &self,
        record: Option<&LinkRecord>,
        interactive: bool,
    ) -> Result<AccessData> {
        let url = text_or_prompt(
            self.url.clone().or_else(|| recorded(record, |r| r.uri.as_str())),
            "Control Center URL",
            interactive,
        )?;
        let login = text_or_prompt(
            self.login
                .clone()
                .or_else(|| recorded(record, |r| r.gcc_username.as_str())),
            "Username",
            interactive,
        )?;
        let password = password_or_prompt(self.password.clone(), "Password", interactive)?;
        Ok(AccessData::new(url, login, password))
    }
}

/// Access data and workstation identity shared by `connect` and `disconnect`.
///
/// Values left out are taken from the link record, then prompted for.
#[derive(Args, Debug, Default)]
pub struct LinkArgs {
    #[command(flatten)]
    pub access: AccessArgs,

    /// Workstation name shown in the Control Center
    #[arg(long)]
    pub name: Option<String>,

    /// Configuration-management node name (derived from the MAC address by default)
    #[arg(long)]
    pub node_name: Option<String>,

    /// Organizational unit search text
    #[arg(long)]
    pub ou: Option<String>,

    /// Validation certificate URL, used when the server has no autoconfiguration
    #[arg(long, env = "GECOS_CERT_URL")]
    pub cert_url: Option<String>,
}

/// Request data resolved from flags, the link record and prompts.
pub(crate) struct LinkRequest {
    pub access: AccessData,
    pub workstation: WorkstationData,
}

impl LinkArgs {
    /// Resolves access data and the workstation identity.
    ///
    /// # Errors
    ///
    /// Returns an error if an interactive prompt fails.
    pub(crate) fn resolve(
        &self,
        record: Option<&LinkRecord>,
        interactive: bool,
    ) -> Result<LinkRequest> {
        let access = self.access.resolve(record, interactive)?;
        let name = text_or_prompt(
            self.name
                .clone()
                .or_else(|| recorded(record, |r| r.gcc_workstation_name.as_str())),
            "Workstation name",
            interactive,
        )?;
        let ou = text_or_prompt(
            self.ou.clone().or_else(|| recorded(record, |r| r.gcc_ou.as_str())),
            "Organizational unit",
            interactive,
        )?;

        let mut workstation = WorkstationData::new(name, ou);
        workstation.node_name = self
            .node_name
            .clone()
            .or_else(|| recorded(record, |r| r.gcc_nodename.as_str()));
        Ok(LinkRequest { access, workstation })
    }
}

fn recorded(record: Option<&LinkRecord>, field: impl Fn(&LinkRecord) -> &str) -> Option<String> {
    record
        .map(field)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Prints the report in the active output mode.
pub(crate) fn render(app: &AppContext, report: &PipelineReport) -> Result<()> {
    if app.is_json() {
        println!("{}", json::format_report(report)?);
    } else {
        app.renderer().render_report(report);
    }
    Ok(())
}

/// Run the connect command.
///
/// # Errors
///
/// Returns an error if the adapters cannot be built or a prompt fails.
/// A failed or canceled pipeline is reported through the exit code.
pub async fn run(app: &AppContext, args: LinkArgs) -> Result<ExitCode> {
    let adapters = SystemAdapters::new(&app.config)?;
    let record = load_record(&adapters.links);
    let request = args.resolve(record.as_ref(), !app.non_interactive)?;

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
    let home = std::env::var("HOME").ok();
    let opts = WorkflowOptions {
        reporter: &reporter,
        config: &app.config,
        home_dir: home.as_deref(),
    };

    let report = connect(&ports, &opts, &request.access, &request.workstation).await;
    render(app, &report)?;
    Ok(exit_code(&report))
}
