//! Configuration-management (Chef) client settings.
//!
//! Resolves the server URL and admin name from user input and server
//! autoconfiguration, and builds the variable maps of each template.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use gecos_common::RemoteAutoConfig;

use crate::domain::access::{AccessData, management_server_url};
use crate::domain::config::PathsConfig;
use crate::domain::error::{ValidationError, WorkflowError};
use crate::domain::template::{
    PLACEHOLDER_ADMIN_NAME, PLACEHOLDER_CHEF_URL, PLACEHOLDER_NODE_NAME, TemplateVars,
};

/// Server URL and admin name written into client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub chef_url: String,
    pub admin_name: String,
}

/// Autoconfiguration values win over values derived from `access`.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedUrl`] if no autoconfigured URL exists
/// and the access URL has no host.
pub fn resolve_server_settings(
    access: &AccessData,
    autoconf: Option<&RemoteAutoConfig>,
) -> Result<ServerSettings, ValidationError> {
    let chef_url = match autoconf.and_then(|c| c.server_uri.clone()) {
        Some(uri) => uri,
        None => management_server_url(access)
            .ok_or_else(|| ValidationError::MalformedUrl(access.url.clone()))?,
    };
    let admin_name = autoconf
        .and_then(|c| c.admin_name.clone())
        .unwrap_or_else(|| access.login.trim().to_string());
    Ok(ServerSettings {
        chef_url,
        admin_name,
    })
}

/// Key locations the Chef client reads, as configured under `paths`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKeys {
    pub validation_key: String,
    pub client_key: String,
}

impl ClientKeys {
    #[must_use]
    pub fn new(validation_key: &Path, client_key: &Path) -> Self {
        Self {
            validation_key: validation_key.display().to_string(),
            client_key: client_key.display().to_string(),
        }
    }

    #[must_use]
    pub fn from_paths(paths: &PathsConfig) -> Self {
        Self::new(&paths.validation_certificate, &paths.client_identity)
    }

    fn insert_into(&self, vars: &mut TemplateVars) {
        vars.insert("validation_key", self.validation_key.clone());
        vars.insert("client_key", self.client_key.clone());
    }
}

impl ServerSettings {
    /// Variables for `client.rb` and `chef.control`.
    #[must_use]
    pub fn client_vars(&self, node_name: &str, keys: &ClientKeys) -> TemplateVars {
        let mut vars = TemplateVars::from([
            ("chef_url", self.chef_url.clone()),
            ("chef_admin_name", self.admin_name.clone()),
            ("chef_node_name", node_name.to_string()),
        ]);
        keys.insert_into(&mut vars);
        vars
    }

    /// Variables for `knife.rb`.
    #[must_use]
    pub fn knife_vars(&self, validation_key: &str) -> TemplateVars {
        TemplateVars::from([
            ("chef_url", self.chef_url.clone()),
            ("chef_admin_name", self.admin_name.clone()),
            ("validation_key", validation_key.to_string()),
        ])
    }
}

/// Variables that reset `client.rb` to its unlinked state. Key paths stay
/// as configured.
#[must_use]
pub fn placeholder_client_vars(keys: &ClientKeys) -> TemplateVars {
    let mut vars = TemplateVars::from([
        ("chef_url", PLACEHOLDER_CHEF_URL.to_string()),
        ("chef_admin_name", PLACEHOLDER_ADMIN_NAME.to_string()),
        ("chef_node_name", PLACEHOLDER_NODE_NAME.to_string()),
    ]);
    keys.insert_into(&mut vars);
    vars
}

/// Decodes the base64 validation certificate shipped in autoconfiguration.
/// Embedded line breaks are tolerated.
///
/// # Errors
///
/// Returns [`WorkflowError::RemoteCommunication`] if the payload is not
/// valid base64.
pub fn decode_validation_certificate(encoded: &str) -> Result<Vec<u8>, WorkflowError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact).map_err(|e| {
        WorkflowError::RemoteCommunication(format!(
            "validation certificate in autoconfiguration is not valid base64: {e}"
        ))
    })
}

/// Environment handed to the linkage command.
#[must_use]
pub fn link_environment(locale: &str, home: Option<&str>) -> Vec<(String, String)> {
    let mut env = vec![
        ("LANG".to_string(), locale.to_string()),
        ("LC_ALL".to_string(), locale.to_string()),
    ];
    if let Some(home) = home {
        env.push(("HOME".to_string(), home.to_string()));
    }
    env
}
