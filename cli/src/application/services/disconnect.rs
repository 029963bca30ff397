//! Application service — disconnect the workstation from its Control Center.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use tracing::info;

use crate::application::ports::{DirectoryClient, LinkStore, ProgressReporter};
use crate::application::services::certificate::retrieve_certificate;
use crate::application::services::pipeline::{Halt, StepTracker};
use crate::application::services::validation::{check_credentials, check_workstation};
use crate::application::services::workflow::{
    Ports, WorkflowOptions, remove_best_effort, remove_checked, render, run_best_effort,
    run_checked,
};
use crate::domain::access::AccessData;
use crate::domain::chef::{ClientKeys, placeholder_client_vars, resolve_server_settings};
use crate::domain::config::KnifeObject;
use crate::domain::error::WorkflowError;
use crate::domain::step::{Direction, PipelineReport, Step};
use crate::domain::template::{CLIENT_CONFIG_TEMPLATE, KNIFE_CONFIG_TEMPLATE, TemplateJob};
use crate::domain::workstation::WorkstationData;

/// Unlinks this workstation and removes it from the Control Center.
///
/// The node name should come from the link record written by `connect`;
/// without one a fresh name is derived, which only matches the server's
/// node if the hardware has not changed.
pub async fn disconnect(
    ports: &impl Ports,
    opts: &WorkflowOptions<'_, impl ProgressReporter>,
    access: &AccessData,
    workstation: &WorkstationData,
) -> PipelineReport {
    let mut tracker = StepTracker::new(opts.reporter, Direction::Disconnect);
    let mut node_name = None;
    let result = run(ports, opts, &mut tracker, access, workstation, &mut node_name).await;
    if result.is_ok() {
        info!(node_name = node_name.as_deref(), "workstation disconnected");
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
    let paths = &config.paths;

    tracker.begin(Step::CheckCredentials);
    check_credentials(ports.directory(), access).await?;
    tracker.complete();

    tracker.begin(Step::CheckWorkstationData);
    let node_name = check_workstation(
        ports.directory(),
        ports.inventory(),
        access,
        workstation,
        Direction::Disconnect,
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
    render(
        ports.templates(),
        ports.files(),
        &TemplateJob {
            template: CLIENT_CONFIG_TEMPLATE,
            destination: paths.client_config.clone(),
            mode: modes.client_config,
            variables: placeholder_client_vars(&ClientKeys::from_paths(paths)),
        },
    )?;
    render(
        ports.templates(),
        ports.files(),
        &TemplateJob {
            template: KNIFE_CONFIG_TEMPLATE,
            destination: paths.knife_config.clone(),
            mode: modes.knife_config,
            variables: settings.knife_vars(&paths.validation_certificate.display().to_string()),
        },
    )?;
    remove_checked(ports.files(), &paths.control_file)?;
    remove_checked(ports.files(), &paths.client_identity)?;
    let delete_node =
        config
            .commands
            .knife_delete_command(KnifeObject::Node, &node_name, &paths.knife_config);
    run_checked(ports.runner(), &delete_node, None).await?;
    remove_checked(ports.files(), &paths.client_wrapper)?;
    let delete_client =
        config
            .commands
            .knife_delete_command(KnifeObject::Client, &node_name, &paths.knife_config);
    run_checked(ports.runner(), &delete_client, None).await?;
    run_best_effort(
        ports.runner(),
        tracker.reporter(),
        &config.commands.service_stop_command()?,
    )
    .await;
    tracker.complete();

    tracker.begin(Step::Register);
    unregister(ports.directory(), access, &node_name).await?;
    ports
        .links()
        .delete()
        .map_err(|e| WorkflowError::file(&paths.access_data, &e))?;
    tracker.complete();

    tracker.begin(Step::Clean);
    remove_best_effort(ports.files(), tracker.reporter(), &paths.validation_certificate);
    remove_best_effort(ports.files(), tracker.reporter(), &paths.knife_config);
    tracker.complete();
    Ok(())
}

async fn unregister(
    directory: &impl DirectoryClient,
    access: &AccessData,
    node_name: &str,
) -> Result<(), WorkflowError> {
    let removed = directory
        .unregister_computer(access, node_name)
        .await
        .map_err(|e| WorkflowError::remote("unregistering the computer", &e))?;
    if !removed {
        return Err(WorkflowError::RemoteCommunication(format!(
            "the server refused to unregister node '{node_name}'"
        )));
    }
    Ok(())
}
