//! Application service — organizational unit search.

use gecos_common::OrganizationalUnit;

use crate::application::ports::DirectoryClient;
use crate::application::services::validation::check_credentials;
use crate::domain::access::AccessData;
use crate::domain::error::WorkflowError;

/// Searches OUs whose name matches `text`, after checking the access data.
///
/// # Errors
///
/// Returns a validation error for unusable access data and a remote error
/// when the server cannot be reached or does not return a list.
pub async fn search_organizational_units(
    directory: &impl DirectoryClient,
    access: &AccessData,
    text: &str,
) -> Result<Vec<OrganizationalUnit>, WorkflowError> {
    check_credentials(directory, access).await?;
    directory
        .search_organizational_units(access, text.trim())
        .await
        .map_err(|e| WorkflowError::remote("searching organizational units", &e))
}
