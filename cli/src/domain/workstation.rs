//! Workstation identity: name, organizational unit and node name.
//!
//! Pure functions only. Node-name derivation is deterministic so that the
//! same machine always maps to the same configuration-management node.

use sha2::{Digest, Sha256};

use crate::domain::error::ValidationError;

/// Addresses starting with this prefix are treated as loopback.
pub const LOOPBACK_PREFIX: &str = "127.0";

/// Workstation identity as entered by the user (or loaded from disk).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkstationData {
    pub name: String,
    /// Configuration-management node name. `None` until derived.
    pub node_name: Option<String>,
    /// Organizational unit search text, e.g. `/Domain/Lab`.
    pub organizational_unit: String,
}

impl WorkstationData {
    #[must_use]
    pub fn new(name: impl Into<String>, organizational_unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_name: None,
            organizational_unit: organizational_unit.into(),
        }
    }

    /// Node name if one is set and not blank.
    #[must_use]
    pub fn node_name(&self) -> Option<&str> {
        self.node_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// One network interface as seen by the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub ip_address: String,
    /// Colon-separated hardware address, e.g. `52:54:00:12:34:56`.
    pub hw_address: Option<String>,
}

/// The workstation name is mandatory.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyWorkstationName`] for a blank name.
pub fn validate_name(data: &WorkstationData) -> Result<(), ValidationError> {
    if data.name.trim().is_empty() {
        return Err(ValidationError::EmptyWorkstationName);
    }
    Ok(())
}

/// # Errors
///
/// Returns [`ValidationError::EmptyOrganizationalUnit`] for a blank OU.
pub fn validate_organizational_unit(data: &WorkstationData) -> Result<(), ValidationError> {
    if data.organizational_unit.trim().is_empty() {
        return Err(ValidationError::EmptyOrganizationalUnit);
    }
    Ok(())
}

/// Rejects `name` when the Control Center already lists it.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateWorkstationName`] on an exact match.
pub fn ensure_unique_name(name: &str, registered: &[String]) -> Result<(), ValidationError> {
    if registered.iter().any(|n| n == name) {
        return Err(ValidationError::DuplicateWorkstationName(name.to_string()));
    }
    Ok(())
}

/// First interface whose address is not in the loopback range.
#[must_use]
pub fn select_interface(interfaces: &[NetworkInterface]) -> Option<&NetworkInterface> {
    interfaces
        .iter()
        .find(|i| !i.ip_address.starts_with(LOOPBACK_PREFIX))
}

/// Lower-case hex encoding of `bytes`.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}

/// Hex SHA-256 of the normalized (lower-case) hardware address.
#[must_use]
pub fn node_name_from_hw_address(hw_address: &str) -> String {
    let normalized = hw_address.trim().to_ascii_lowercase();
    hex_encode(&Sha256::digest(normalized.as_bytes()))
}

/// Derives the node name from the first non-loopback interface.
///
/// # Errors
///
/// Returns a [`ValidationError`] if no interface qualifies or the selected
/// one has no hardware address.
pub fn derive_node_name(interfaces: &[NetworkInterface]) -> Result<String, ValidationError> {
    let iface = select_interface(interfaces).ok_or(ValidationError::NoUsableInterface)?;
    let hw = iface
        .hw_address
        .as_deref()
        .filter(|hw| !hw.trim().is_empty() && hw.trim() != "00:00:00:00:00:00")
        .ok_or_else(|| ValidationError::MissingHardwareAddress(iface.name.clone()))?;
    Ok(node_name_from_hw_address(hw))
}
