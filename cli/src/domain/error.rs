//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Missing or malformed user input. Recovered by asking the user again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The URL field is empty. Please fill all the mandatory fields.")]
    EmptyUrl,

    #[error("Malformed URL '{0}'. Please double-check it.")]
    MalformedUrl(String),

    #[error("The username field is empty. Please fill all the mandatory fields.")]
    EmptyLogin,

    #[error("The password field is empty. Please fill all the mandatory fields.")]
    EmptyPassword,

    #[error("The workstation name field is empty. Please fill all the mandatory fields.")]
    EmptyWorkstationName,

    #[error("The workstation name '{0}' already exists. Please choose a different name.")]
    DuplicateWorkstationName(String),

    #[error("You must select an organizational unit.")]
    EmptyOrganizationalUnit,

    #[error("No network interface outside the loopback range was found.")]
    NoUsableInterface,

    #[error("Interface '{0}' has no usable hardware address.")]
    MissingHardwareAddress(String),
}

impl ValidationError {
    /// CLI flag that lets the user fix this field, if any.
    #[must_use]
    pub fn field_hint(&self) -> Option<&'static str> {
        match self {
            Self::EmptyUrl | Self::MalformedUrl(_) => Some("--url"),
            Self::EmptyLogin => Some("--login"),
            Self::EmptyPassword => Some("--password"),
            Self::EmptyWorkstationName | Self::DuplicateWorkstationName(_) => Some("--name"),
            Self::EmptyOrganizationalUnit => Some("--ou"),
            Self::NoUsableInterface | Self::MissingHardwareAddress(_) => Some("--node-name"),
        }
    }
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors raised while rendering an embedded template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{0}' is not embedded in this build")]
    UnknownTemplate(String),

    #[error("template '{template}' references undefined variable '{name}'")]
    MissingVariable { template: String, name: String },
}

// ── Workflow errors ───────────────────────────────────────────────────────────

/// Reason a connect/disconnect step failed.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot communicate with GECOS CC: {0}")]
    RemoteCommunication(String),

    #[error("Cannot create, modify or remove {path}: {message}")]
    FileSystem { path: PathBuf, message: String },

    #[error("Command '{command}' failed: {message}")]
    ExternalCommand { command: String, message: String },

    #[error(transparent)]
    TemplateRender(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WorkflowError {
    /// Stable machine-readable code for `--json` output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::RemoteCommunication(_) => "remote_communication",
            Self::FileSystem { .. } => "file_system",
            Self::ExternalCommand { .. } => "external_command",
            Self::TemplateRender(_) => "template",
            Self::Config(_) => "config",
        }
    }

    /// CLI flag that fixes a validation failure, if any.
    #[must_use]
    pub fn field_hint(&self) -> Option<&'static str> {
        match self {
            Self::Validation(v) => v.field_hint(),
            _ => None,
        }
    }

    pub(crate) fn remote(context: &str, err: &anyhow::Error) -> Self {
        Self::RemoteCommunication(format!("{context}: {err:#}"))
    }

    pub(crate) fn file(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to loading the assistant configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid mode '{value}' for {key}: expected an octal permission such as 0644")]
    InvalidMode { key: String, value: String },

    #[error("Command for {key} is empty")]
    EmptyCommand { key: String },
}
