//! Network infrastructure — implements `NetworkInventory` from `ip` output
//! and sysfs hardware addresses.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{CommandRunner, NetworkInventory};
use crate::domain::workstation::NetworkInterface;

const SYSFS_NET: &str = "/sys/class/net";

/// Lists IPv4 interfaces in kernel index order.
pub struct IpNetworkInventory<R> {
    runner: R,
    sysfs_root: PathBuf,
}

impl<R: CommandRunner> IpNetworkInventory<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self::with_sysfs_root(runner, PathBuf::from(SYSFS_NET))
    }

    /// Reads hardware addresses below `sysfs_root` (used in tests).
    #[must_use]
    pub fn with_sysfs_root(runner: R, sysfs_root: PathBuf) -> Self {
        Self { runner, sysfs_root }
    }

    async fn hw_address(&self, interface: &str) -> Option<String> {
        let path = self.sysfs_root.join(interface).join("address");
        match tokio::fs::read_to_string(&path).await {
            Ok(addr) if !addr.trim().is_empty() => Some(addr.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no hardware address");
                None
            }
        }
    }
}

impl<R: CommandRunner> NetworkInventory for IpNetworkInventory<R> {
    async fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        let output = self
            .runner
            .run("ip", &["-o", "-4", "addr", "show"])
            .await
            .context("listing IPv4 addresses")?;
        anyhow::ensure!(
            output.status.success(),
            "ip addr show failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        let mut interfaces = Vec::new();
        for (name, ip_address) in parse_ip_addr(&String::from_utf8_lossy(&output.stdout)) {
            let hw_address = self.hw_address(&name).await;
            interfaces.push(NetworkInterface {
                name,
                ip_address,
                hw_address,
            });
        }
        Ok(interfaces)
    }
}

/// Parses `ip -o -4 addr show` into `(interface, address)` pairs.
///
/// Lines look like `2: eth0    inet 192.168.1.10/24 brd ... scope global eth0`.
/// The prefix length and any `@peer` suffix on the name are dropped.
#[must_use]
pub fn parse_ip_addr(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _index = fields.next()?;
            let name = fields.next()?;
            if fields.next()? != "inet" {
                return None;
            }
            let address = fields.next()?;
            let name = name.split('@').next().unwrap_or(name);
            let ip = address.split('/').next().unwrap_or(address);
            Some((name.to_string(), ip.to_string()))
        })
        .collect()
}
