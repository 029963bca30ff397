//! First two pipeline steps: credential and workstation checks.

use tracing::debug;

use crate::application::ports::{DirectoryClient, NetworkInventory};
use crate::application::services::pipeline::Halt;
use crate::domain::access::{AccessData, validate_access_data};
use crate::domain::error::WorkflowError;
use crate::domain::step::Direction;
use crate::domain::workstation::{
    WorkstationData, derive_node_name, ensure_unique_name, validate_name,
    validate_organizational_unit,
};

/// Local field checks, then one remote credential check.
///
/// # Errors
///
/// Returns a validation error without touching the network if a field is
/// empty or malformed, and a remote error if the server rejects or cannot
/// answer.
pub async fn check_credentials(
    directory: &impl DirectoryClient,
    access: &AccessData,
) -> Result<(), WorkflowError> {
    validate_access_data(access)?;
    let accepted = directory
        .validate_credentials(access)
        .await
        .map_err(|e| WorkflowError::remote("credential check", &e))?;
    if !accepted {
        return Err(WorkflowError::RemoteCommunication(format!(
            "{} rejected the credentials of '{}'",
            access.base_url(),
            access.login.trim()
        )));
    }
    Ok(())
}

/// Checks the workstation fields and returns the node name to use.
///
/// Without a preset node name the node name is derived from the network
/// inventory. When connecting, the workstation name must also be unused on
/// the server; a workstation being disconnected is expected to be there.
pub(crate) async fn check_workstation(
    directory: &impl DirectoryClient,
    inventory: &impl NetworkInventory,
    access: &AccessData,
    workstation: &WorkstationData,
    direction: Direction,
) -> Result<String, Halt> {
    validate_name(workstation)?;
    validate_organizational_unit(workstation)?;

    if let Some(node_name) = workstation.node_name() {
        debug!(node_name, "reusing node name");
        return Ok(node_name.to_string());
    }

    if direction == Direction::Connect {
        let registered = directory
            .list_computer_names(access)
            .await
            .map_err(|e| WorkflowError::remote("listing registered computers", &e))?;
        ensure_unique_name(workstation.name.trim(), &registered)?;
    }

    let interfaces = inventory
        .interfaces()
        .await
        .map_err(|e| WorkflowError::ExternalCommand {
            command: "network inventory".to_string(),
            message: format!("{e:#}"),
        })?;
    let node_name = derive_node_name(&interfaces)?;
    debug!(%node_name, "derived node name");
    Ok(node_name)
}
