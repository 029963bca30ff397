//! Infrastructure implementation of the `LinkStore` port.
//!
//! The link record is written through the secure writer so it gets the same
//! ownership and `0600` mode as the validation certificate.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gecos_common::LinkRecord;

use crate::application::ports::{LinkStore, SystemFiles};

/// JSON link record at a fixed path (`/etc/gcc.control` by default).
pub struct JsonLinkStore<F> {
    path: PathBuf,
    files: F,
}

impl<F: SystemFiles> JsonLinkStore<F> {
    #[must_use]
    pub fn new(path: PathBuf, files: F) -> Self {
        Self { path, files }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: SystemFiles> LinkStore for JsonLinkStore<F> {
    fn load(&self) -> Result<Option<LinkRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading link record {}", self.path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let record = serde_json::from_str(&content)
            .with_context(|| format!("parsing link record {}", self.path.display()))?;
        Ok(Some(record))
    }

    fn save(&self, record: &LinkRecord) -> Result<()> {
        let content = serde_json::to_string_pretty(record).context("serializing link record")?;
        self.files
            .write_secure(&self.path, content.as_bytes())
            .with_context(|| format!("saving link record {}", self.path.display()))
    }

    fn delete(&self) -> Result<()> {
        self.files.remove_file(&self.path)
    }
}
