//! Application service — is this workstation linked?

use anyhow::Result;
use gecos_common::LinkRecord;
use serde::Serialize;

use crate::application::ports::LinkStore;

/// Link state derived from the persisted link record.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    Linked {
        url: String,
        login: String,
        node_name: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        workstation_name: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        organizational_unit: String,
        linked_at: chrono::DateTime<chrono::Utc>,
    },
    NotLinked,
}

impl LinkStatus {
    #[must_use]
    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Linked { .. })
    }
}

impl From<LinkRecord> for LinkStatus {
    fn from(record: LinkRecord) -> Self {
        Self::Linked {
            url: record.uri,
            login: record.gcc_username,
            node_name: record.gcc_nodename,
            workstation_name: record.gcc_workstation_name,
            organizational_unit: record.gcc_ou,
            linked_at: record.linked_at,
        }
    }
}

/// Reads the link record. A record with `gcc_link: false` counts as not linked.
///
/// # Errors
///
/// Returns an error if the record exists but cannot be read or parsed.
pub fn link_status(links: &impl LinkStore) -> Result<LinkStatus> {
    Ok(match links.load()? {
        Some(record) if record.gcc_link => record.into(),
        _ => LinkStatus::NotLinked,
    })
}
