//! Command implementations

pub mod config;
pub mod connect;
pub mod disconnect;
pub mod ou;
pub mod status;
pub mod version;

use std::process::ExitCode;

use anyhow::{Context, Result};
use gecos_common::LinkRecord;
use tracing::warn;

use crate::application::ports::LinkStore;
use crate::domain::config::AssistantConfig;
use crate::domain::step::{Outcome, PipelineReport};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::directory::HttpDirectoryClient;
use crate::infra::fs::SecureFs;
use crate::infra::network::IpNetworkInventory;
use crate::infra::state::JsonLinkStore;

/// Exit status of a canceled pipeline.
pub const EXIT_CANCELED: u8 = 2;

/// Production adapters for every I/O port, built from the configuration.
pub struct SystemAdapters {
    pub files: SecureFs,
    pub links: JsonLinkStore<SecureFs>,
    pub directory: HttpDirectoryClient,
    pub runner: TokioCommandRunner,
    pub inventory: IpNetworkInventory<TokioCommandRunner>,
}

impl SystemAdapters {
    /// # Errors
    ///
    /// Returns an error if the configured owner/group cannot be resolved or
    /// the HTTP client cannot be built.
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let files = SecureFs::from_config(&config.ownership)
            .context("cannot prepare the secure file writer")?;
        let links = JsonLinkStore::new(config.paths.access_data.clone(), files.clone());
        Ok(Self {
            files,
            links,
            directory: HttpDirectoryClient::new(&config.network)?,
            runner: TokioCommandRunner::new(config.commands.timeout()),
            inventory: IpNetworkInventory::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT)),
        })
    }
}

/// Loads the link record for prefilling. A corrupt record is logged and
/// ignored so the user can still connect over it.
pub(crate) fn load_record(links: &impl LinkStore) -> Option<LinkRecord> {
    match links.load() {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "ignoring unreadable link record");
            None
        }
    }
}

/// Maps a pipeline outcome to the process exit status.
#[must_use]
pub fn exit_code(report: &PipelineReport) -> ExitCode {
    match report.outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Failed { .. } => ExitCode::FAILURE,
        Outcome::Canceled { .. } => ExitCode::from(EXIT_CANCELED),
    }
}
