use serde::{Deserialize, Serialize};

/// Autoconfiguration document served by the Control Center at `/auth/config/`.
///
/// Only the `chef` section is consumed; everything else the server sends
/// (NTP, users, software sources, ...) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chef: Option<ChefAutoConfig>,
}

/// `chef` section of the autoconfiguration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChefAutoConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chef_server_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chef_admin_name: Option<String>,
    /// Base64-encoded validation certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chef_validation: Option<String>,
}

/// Server-provided values that override what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAutoConfig {
    pub server_uri: Option<String>,
    pub admin_name: Option<String>,
    /// Base64-encoded validation certificate.
    pub validation_certificate: Option<String>,
}

impl RemoteAutoConfig {
    /// Returns `true` when the server supplied nothing usable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.server_uri.is_none() && self.admin_name.is_none() && self.validation_certificate.is_none()
    }
}

impl From<AutoConfigDocument> for RemoteAutoConfig {
    fn from(doc: AutoConfigDocument) -> Self {
        let chef = doc.chef.unwrap_or_default();
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            server_uri: non_blank(chef.chef_server_uri),
            admin_name: non_blank(chef.chef_admin_name),
            validation_certificate: non_blank(chef.chef_validation),
        }
    }
}

/// Response of `/computers/list/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputerList {
    #[serde(default)]
    pub computers: Vec<ComputerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComputerEntry {
    pub name: String,
}

/// Single entry of the `ous` array returned by `/ou/gca/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OuEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// Organizational unit as shown to the user: `(id, label)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrganizationalUnit {
    pub id: String,
    pub label: String,
}

impl From<OuEntry> for OrganizationalUnit {
    fn from(entry: OuEntry) -> Self {
        let label = match entry.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => {
                format!("{}/{}", path.trim_end_matches('/'), entry.name)
            }
            _ => entry.name,
        };
        Self {
            id: entry.id,
            label,
        }
    }
}

/// Response of the register/unregister endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OkResponse {
    #[serde(default)]
    pub ok: bool,
}
