use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted proof that this workstation is linked to a Control Center.
///
/// Stored as JSON in `/etc/gcc.control`. The password is never written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkRecord {
    /// Control Center base URL.
    pub uri: String,
    pub gcc_username: String,
    /// Node name registered in the configuration-management server.
    pub gcc_nodename: String,
    #[serde(default)]
    pub gcc_workstation_name: String,
    #[serde(default)]
    pub gcc_ou: String,
    #[serde(default = "default_link")]
    pub gcc_link: bool,
    pub linked_at: DateTime<Utc>,
}

fn default_link() -> bool {
    true
}
