//! Domain types and validators for the assistant configuration.
//!
//! Pure functions only. No I/O, no async, no filesystem access.
//! Defaults reproduce the paths and commands of a stock GECOS workstation.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/gecos-assistant/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AssistantConfig {
    pub paths: PathsConfig,
    pub commands: CommandsConfig,
    pub ownership: OwnershipConfig,
    pub network: NetworkConfig,
}

/// System files touched by connect/disconnect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Temporary validation certificate used to bootstrap the client identity.
    pub validation_certificate: PathBuf,
    pub client_config: PathBuf,
    pub control_file: PathBuf,
    /// Management-client (`knife`) configuration used during disconnect.
    pub knife_config: PathBuf,
    /// Client identity created by the linkage command.
    pub client_identity: PathBuf,
    pub client_wrapper: PathBuf,
    /// Persisted link record (access data + node name).
    pub access_data: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            validation_certificate: PathBuf::from("/etc/chef/validation.pem"),
            client_config: PathBuf::from("/etc/chef/client.rb"),
            control_file: PathBuf::from("/etc/chef.control"),
            knife_config: PathBuf::from("/etc/chef/knife.rb"),
            client_identity: PathBuf::from("/etc/chef/client.pem"),
            client_wrapper: PathBuf::from("/usr/bin/chef-client-wrapper"),
            access_data: PathBuf::from("/etc/gcc.control"),
        }
    }
}

/// External commands, as argument vectors (no shell involved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandsConfig {
    pub link: Vec<String>,
    pub service_start: Vec<String>,
    pub service_stop: Vec<String>,
    /// Management client program used to delete nodes and clients.
    pub knife: String,
    /// Locale exported to the linkage command (`LANG`, `LC_ALL`).
    pub locale: String,
    /// Upper bound for any single external command.
    pub timeout_secs: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        let argv = |parts: &[&str]| parts.iter().map(|p| (*p).to_string()).collect();
        Self {
            link: argv(&[
                "chef-client",
                "-j",
                "/usr/share/gecosws-config-assistant/base.json",
            ]),
            service_start: argv(&["service", "chef-client", "start"]),
            service_stop: argv(&["service", "chef-client", "stop"]),
            knife: "knife".to_string(),
            locale: "es_ES.UTF-8".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Owner, group and permission bits of written files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OwnershipConfig {
    pub owner: String,
    pub group: String,
    /// Mode for secrets (validation certificate, link record).
    pub secure_mode: String,
    pub client_config_mode: String,
    pub control_file_mode: String,
    pub knife_config_mode: String,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            owner: "root".to_string(),
            group: "root".to_string(),
            secure_mode: "0600".to_string(),
            client_config_mode: "0644".to_string(),
            control_file_mode: "0755".to_string(),
            knife_config_mode: "0644".to_string(),
        }
    }
}

/// HTTP settings for the Control Center client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub http_timeout_secs: u64,
    /// Accept self-signed Control Center certificates.
    pub accept_invalid_certs: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

// ── Command lines ────────────────────────────────────────────────────────────

/// Program plus arguments, ready for the command runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    fn from_argv(key: &str, argv: &[String]) -> Result<Self, ConfigError> {
        let (program, args) = argv
            .split_first()
            .filter(|(p, _)| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::EmptyCommand {
                key: key.to_string(),
            })?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Kind of object removed from the management server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnifeObject {
    Node,
    Client,
}

impl CommandsConfig {
    /// Upper bound for one external command.
    #[must_use]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCommand`] if `commands.link` is empty.
    pub fn link_command(&self) -> Result<CommandLine, ConfigError> {
        CommandLine::from_argv("commands.link", &self.link)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCommand`] if `commands.service_start` is empty.
    pub fn service_start_command(&self) -> Result<CommandLine, ConfigError> {
        CommandLine::from_argv("commands.service_start", &self.service_start)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCommand`] if `commands.service_stop` is empty.
    pub fn service_stop_command(&self) -> Result<CommandLine, ConfigError> {
        CommandLine::from_argv("commands.service_stop", &self.service_stop)
    }

    /// `knife <node|client> delete <node_name> -c <knife_config> -y`.
    ///
    /// The node name is one argument, passed through untouched.
    #[must_use]
    pub fn knife_delete_command(
        &self,
        object: KnifeObject,
        node_name: &str,
        knife_config: &Path,
    ) -> CommandLine {
        let kind = match object {
            KnifeObject::Node => "node",
            KnifeObject::Client => "client",
        };
        CommandLine {
            program: self.knife.clone(),
            args: vec![
                kind.to_string(),
                "delete".to_string(),
                node_name.to_string(),
                "-c".to_string(),
                knife_config.display().to_string(),
                "-y".to_string(),
            ],
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Parses an octal permission string such as `"0644"` or `"600"`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMode`] if `value` is not octal or exceeds `0o7777`.
pub fn parse_mode(key: &str, value: &str) -> Result<u32, ConfigError> {
    let digits = value.trim().trim_start_matches("0o");
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|m| *m <= 0o7777 && !digits.is_empty())
        .ok_or_else(|| ConfigError::InvalidMode {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// File modes resolved from [`OwnershipConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileModes {
    pub secure: u32,
    pub client_config: u32,
    pub control_file: u32,
    pub knife_config: u32,
}

impl OwnershipConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] for the first unparsable mode.
    pub fn modes(&self) -> Result<FileModes, ConfigError> {
        Ok(FileModes {
            secure: parse_mode("ownership.secure_mode", &self.secure_mode)?,
            client_config: parse_mode("ownership.client_config_mode", &self.client_config_mode)?,
            control_file: parse_mode("ownership.control_file_mode", &self.control_file_mode)?,
            knife_config: parse_mode("ownership.knife_config_mode", &self.knife_config_mode)?,
        })
    }
}

impl AssistantConfig {
    /// Checks every value that is only interpreted later in the workflow.
    ///
    /// # Errors
    ///
    /// Returns the first invalid mode or empty command.
    pub fn validate(&self) -> Result<()> {
        self.ownership.modes()?;
        self.commands.link_command()?;
        self.commands.service_start_command()?;
        self.commands.service_stop_command()?;
        if self.commands.knife.trim().is_empty() {
            return Err(ConfigError::EmptyCommand {
                key: "commands.knife".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
