//! Application service — connect the workstation to a Control Center.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use chrono::Utc;
use gecos_common::LinkRecord;
use tracing::info;

use crate::application::ports::{DirectoryClient, LinkStore, ProgressReporter};
use crate::application::services::certificate::retrieve_certificate;
use crate::application::services::pipeline::{Halt, StepTracker};
use crate::application::services::validation::{check_credentials, check_workstation};
use crate::application::services::workflow::{
    Ports, WorkflowOptions, remove_best_effort, render, run_best_effort, run_checked,
};
use crate::domain::access::AccessData;
use crate::domain::chef::{ClientKeys, link_environment, resolve_server_settings};
use crate::domain::error::WorkflowError;
use crate::domain::step::{Direction, PipelineReport, Step};
use crate::domain::template::{CLIENT_CONFIG_TEMPLATE, CONTROL_FILE_TEMPLATE, TemplateJob};
use crate::domain::workstation::WorkstationData;

/// Links this workstation and registers it in the Control Center.
///
/// Never returns an error: the outcome, including which step failed, is in
/// the returned report. Completed steps are not rolled back.
pub async fn connect(
    ports: &impl Ports,
    opts: &WorkflowOptions<'_, impl ProgressReporter>,
    access: &AccessData,
    workstation: &WorkstationData,
) -> PipelineReport {
    let mut tracker = StepTracker::new(opts.reporter, Direction::Connect);
    let mut node_name = None;
    let result = run(ports, opts, &mut tracker, access, workstation, &mut node_name).await;
    if result.is_ok() {
        info!(node_name = node_name.as_deref(), "workstation connected");
    }
    tracker.finish(result, node_name)
}

async fn run<R: ProgressReporter>(
    ports: &impl Ports,
    opts: &WorkflowOptions<'_, R>,
    tracker: &mut StepTracker<'_, R>,
    access: &AccessData,
    workstation: &WorkstationData,
    node_name_out: &mut Option<String>,
) -> Result<(), Halt> {
    let config = opts.config;

    tracker.begin(Step::CheckCredentials);
    check_credentials(ports.directory(), access).await?;
    tracker.complete();

    tracker.begin(Step::CheckWorkstationData);
    let node_name = check_workstation(
        ports.directory(),
        ports.inventory(),
        access,
        workstation,
        Direction::Connect,
    )
    .await?;
    *node_name_out = Some(node_name.clone());
    tracker.complete();

    tracker.begin(Step::CertificateRetrieval);
    let autoconf = retrieve_certificate(
        ports.directory(),
        ports.prompt(),
        ports.files(),
        config,
        access,
    )
    .await?;
    tracker.complete();

    tracker.begin(Step::Link);
    let settings = resolve_server_settings(access, autoconf.as_ref())?;
    let modes = config.ownership.modes()?;
    let keys = ClientKeys::from_paths(&config.paths);
    render(
        ports.templates(),
        ports.files(),
        &TemplateJob {
            template: CLIENT_CONFIG_TEMPLATE,
            destination: config.paths.client_config.clone(),
            mode: modes.client_config,
            variables: settings.client_vars(&node_name, &keys),
        },
    )?;
    let env = link_environment(&config.commands.locale, opts.home_dir);
    run_checked(ports.runner(), &config.commands.link_command()?, Some(env.as_slice())).await?;
    run_best_effort(
        ports.runner(),
        tracker.reporter(),
        &config.commands.service_start_command()?,
    )
    .await;
    render(
        ports.templates(),
        ports.files(),
        &TemplateJob {
            template: CONTROL_FILE_TEMPLATE,
            destination: config.paths.control_file.clone(),
            mode: modes.control_file,
            variables: settings.client_vars(&node_name, &keys),
        },
    )?;
    tracker.complete();

    tracker.begin(Step::Register);
    register(ports.directory(), access, workstation, &node_name).await?;
    ports
        .links()
        .save(&LinkRecord {
            uri: access.base_url().to_string(),
            gcc_username: access.login.trim().to_string(),
            gcc_nodename: node_name.clone(),
            gcc_workstation_name: workstation.name.trim().to_string(),
            gcc_ou: workstation.organizational_unit.trim().to_string(),
            gcc_link: true,
            linked_at: Utc::now(),
        })
        .map_err(|e| WorkflowError::file(&config.paths.access_data, &e))?;
    tracker.complete();

    tracker.begin(Step::Clean);
    remove_best_effort(
        ports.files(),
        tracker.reporter(),
        &config.paths.validation_certificate,
    );
    tracker.complete();
    Ok(())
}

/// Resolves the OU text to its first match and registers the node there.
async fn register(
    directory: &impl DirectoryClient,
    access: &AccessData,
    workstation: &WorkstationData,
    node_name: &str,
) -> Result<(), WorkflowError> {
    let query = workstation.organizational_unit.trim();
    let ous = directory
        .search_organizational_units(access, query)
        .await
        .map_err(|e| WorkflowError::remote("searching organizational units", &e))?;
    let ou = ous.first().ok_or_else(|| {
        WorkflowError::RemoteCommunication(format!("no organizational unit matches '{query}'"))
    })?;
    info!(ou_id = %ou.id, ou = %ou.label, "registering computer");
    let registered = directory
        .register_computer(access, node_name, &ou.id)
        .await
        .map_err(|e| WorkflowError::remote("registering the computer", &e))?;
    if !registered {
        return Err(WorkflowError::RemoteCommunication(format!(
            "the server refused to register node '{node_name}'"
        )));
    }
    Ok(())
}
