//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Link a workstation to a GECOS Control Center
#[derive(Parser)]
#[command(
    name = "gecos-assistant",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never prompt; missing values are treated as empty
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Link this workstation to a Control Center
    Connect(commands::connect::LinkArgs),

    /// Unlink this workstation from its Control Center
    Disconnect(commands::connect::LinkArgs),

    /// Show whether this workstation is linked
    Status,

    /// Organizational units
    #[command(subcommand)]
    Ou(commands::ou::OuCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the command
    /// cannot be set up. Pipeline failures are reported through the exit
    /// code instead.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            config,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, config },
        };

        match command {
            Command::Version => {
                commands::version::run(json, quiet);
                Ok(ExitCode::SUCCESS)
            }
            Command::Connect(args) => commands::connect::run(&AppContext::new(&flags)?, args).await,
            Command::Disconnect(args) => {
                commands::disconnect::run(&AppContext::new(&flags)?, args).await
            }
            Command::Status => commands::status::run(&AppContext::new(&flags)?),
            Command::Ou(cmd) => commands::ou::run(&AppContext::new(&flags)?, cmd).await,
            Command::Config(cmd) => commands::config::run(&AppContext::new(&flags)?, &cmd),
        }
    }
}
