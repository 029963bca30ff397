//! Filesystem infrastructure — implements the `SystemFiles` port.
//!
//! Every file is created/truncated, then ownership and mode are forced, and
//! only then is the content written, so sensitive bytes never sit in a file
//! with looser permissions.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{MetadataExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::SystemFiles;
use crate::domain::accounts::{lookup_gid, lookup_uid};
use crate::domain::config::OwnershipConfig;

const PASSWD_PATH: &str = "/etc/passwd";
const GROUP_PATH: &str = "/etc/group";

/// Owner applied to every written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOwner {
    pub uid: u32,
    pub gid: u32,
}

impl FileOwner {
    /// Resolves account names through `/etc/passwd` and `/etc/group`.
    ///
    /// # Errors
    ///
    /// Returns an error if either database is unreadable or the name is
    /// unknown.
    pub fn resolve(owner: &str, group: &str) -> Result<Self> {
        Self::resolve_from(Path::new(PASSWD_PATH), Path::new(GROUP_PATH), owner, group)
    }

    fn resolve_from(passwd: &Path, groups: &Path, owner: &str, group: &str) -> Result<Self> {
        let passwd_db = std::fs::read_to_string(passwd)
            .with_context(|| format!("reading {}", passwd.display()))?;
        let group_db = std::fs::read_to_string(groups)
            .with_context(|| format!("reading {}", groups.display()))?;
        let uid = lookup_uid(&passwd_db, owner)
            .with_context(|| format!("unknown user '{owner}' in {}", passwd.display()))?;
        let gid = lookup_gid(&group_db, group)
            .with_context(|| format!("unknown group '{group}' in {}", groups.display()))?;
        Ok(Self { uid, gid })
    }
}

/// Production `SystemFiles` with a fixed owner and secure mode.
#[derive(Debug, Clone)]
pub struct SecureFs {
    owner: FileOwner,
    secure_mode: u32,
}

impl SecureFs {
    #[must_use]
    pub fn new(owner: FileOwner, secure_mode: u32) -> Self {
        Self { owner, secure_mode }
    }

    /// Builds the writer from the ownership section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the accounts cannot be resolved or the secure
    /// mode is not a valid octal permission.
    pub fn from_config(ownership: &OwnershipConfig) -> Result<Self> {
        let owner = FileOwner::resolve(&ownership.owner, &ownership.group)?;
        let modes = ownership.modes()?;
        Ok(Self::new(owner, modes.secure))
    }

    fn write_with_mode(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(mode)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        self.enforce(&file, path, mode)?;
        file.write_all(content)
            .with_context(|| format!("writing {}", path.display()))?;
        file.sync_all()
            .with_context(|| format!("syncing {}", path.display()))?;
        Ok(())
    }

    /// Forces owner and mode on an open file, touching only what differs.
    fn enforce(&self, file: &File, path: &Path, mode: u32) -> Result<()> {
        let meta = file
            .metadata()
            .with_context(|| format!("reading metadata of {}", path.display()))?;
        if meta.uid() != self.owner.uid || meta.gid() != self.owner.gid {
            std::os::unix::fs::fchown(file, Some(self.owner.uid), Some(self.owner.gid))
                .with_context(|| {
                    format!(
                        "changing owner of {} to {}:{}",
                        path.display(),
                        self.owner.uid,
                        self.owner.gid
                    )
                })?;
        }
        if meta.permissions().mode() & 0o7777 != mode {
            file.set_permissions(std::fs::Permissions::from_mode(mode))
                .with_context(|| format!("setting mode {mode:o} on {}", path.display()))?;
        }
        Ok(())
    }
}

impl SystemFiles for SecureFs {
    fn write_secure(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.write_with_mode(path, content, self.secure_mode)?;
        debug!(path = %path.display(), "secure file written");
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str, mode: u32) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        self.write_with_mode(path, content.as_bytes(), mode)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}
