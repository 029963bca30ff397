//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `gecos_common` — never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;
use gecos_common::{LinkRecord, OrganizationalUnit, RemoteAutoConfig};

use crate::domain::{AccessData, AssistantConfig, NetworkInterface, Step, StepStatus};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with the inherited environment and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with its environment replaced by `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. On timeout, the child process must be killed.
    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(String, String)],
    ) -> Result<Output>;
}

// ── Remote Directory Port ─────────────────────────────────────────────────────

/// Control Center operations used by the connect/disconnect workflows.
///
/// A negative answer from the server is `Ok(false)` / `Ok(None)` / empty;
/// `Err` is reserved for transport and decoding failures.
#[allow(async_fn_in_trait)]
pub trait DirectoryClient {
    /// `true` when the server accepts the credentials.
    async fn validate_credentials(&self, access: &AccessData) -> Result<bool>;
    /// Server autoconfiguration, `None` when the server has none.
    async fn fetch_autoconf(&self, access: &AccessData) -> Result<Option<RemoteAutoConfig>>;
    /// Names of every computer already registered.
    async fn list_computer_names(&self, access: &AccessData) -> Result<Vec<String>>;
    /// OUs matching `text`, best match first.
    ///
    /// # Errors
    ///
    /// Returns an error if the server answers with anything but a list.
    async fn search_organizational_units(
        &self,
        access: &AccessData,
        text: &str,
    ) -> Result<Vec<OrganizationalUnit>>;
    async fn register_computer(&self, access: &AccessData, node_name: &str, ou_id: &str)
    -> Result<bool>;
    async fn unregister_computer(&self, access: &AccessData, node_name: &str) -> Result<bool>;
    /// Fetch a PEM document from an arbitrary URL.
    async fn download_certificate(&self, url: &str) -> Result<String>;
}

// ── Network Inventory Port ────────────────────────────────────────────────────

/// Lists network interfaces so the node name can be derived without
/// touching the real network stack in tests.
#[allow(async_fn_in_trait)]
pub trait NetworkInventory {
    async fn interfaces(&self) -> Result<Vec<NetworkInterface>>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// System file writes with enforced ownership and permissions.
pub trait SystemFiles {
    /// Create/truncate `path`, force owner/group and `0600`-style secure
    /// mode, then write `content`.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the path if any step fails; the caller
    /// must not trust the file in that case.
    fn write_secure(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Write a rendered template with the configured owner/group and `mode`.
    /// Parent directories are created.
    fn write_file(&self, path: &Path, content: &str, mode: u32) -> Result<()>;

    /// Remove `path`. Absent files are not an error.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// Persistence of the link record (access data + node name).
pub trait LinkStore {
    /// Load the record, returning `None` if the workstation is not linked.
    fn load(&self) -> Result<Option<LinkRecord>>;
    fn save(&self, record: &LinkRecord) -> Result<()>;
    /// Remove the record. Absent records are not an error.
    fn delete(&self) -> Result<()>;
}

/// Abstracts configuration loading so tests can use in-memory configs.
pub trait ConfigStore {
    /// Load config, returning defaults if no file exists.
    fn load(&self) -> Result<AssistantConfig>;
    /// Path the configuration is read from.
    fn path(&self) -> Result<PathBuf>;
}

/// Renders embedded templates by name.
pub trait TemplateSource {
    /// Raw template text.
    ///
    /// # Errors
    ///
    /// Returns an error if no template with that name exists.
    fn template(&self, name: &str) -> Result<&'static str>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Asks the user where to download the validation certificate from.
pub trait CertificatePrompt {
    /// `Ok(None)` means the user dismissed the prompt.
    fn certificate_url(&self) -> Result<Option<String>>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// A step changed status.
    fn step_status(&self, step: Step, status: StepStatus);
    /// Label of the link step ("Link to Chef" / "Unlink from Chef").
    fn set_link_label(&self, label: &str);
    /// Label of the register step.
    fn set_register_label(&self, label: &str);
    /// Non-fatal problem inside a step.
    fn warn(&self, message: &str);
    /// The pipeline has stopped; the user may dismiss the progress view.
    fn finish(&self);
}
