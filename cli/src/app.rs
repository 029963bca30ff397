//! Application context — unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the global flags. Commands borrow the
//! output context, the loaded configuration and the interaction mode from
//! here instead of re-reading flags or environment variables.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AssistantConfig;
use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `GECOS_ASSISTANT_YES`).
    pub yes: bool,
    /// Configuration file given with `--config`.
    pub config: Option<std::path::PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where the configuration comes from.
    pub config_store: YamlConfigStore,
    /// Effective configuration (defaults merged with the file).
    pub config: AssistantConfig,
    /// When `true`, never prompt; missing values stay empty and the
    /// certificate prompt counts as dismissed.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or
    /// `GECOS_ASSISTANT_YES` environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but is invalid.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env =
            std::env::var("CI").is_ok() || std::env::var("GECOS_ASSISTANT_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env || flags.output.json;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore::new(flags.behaviour.config.clone());
        let config = config_store.load()?;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store,
            config,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Human renderer over this context's output settings.
    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes`, `--json` or
    /// `GECOS_ASSISTANT_YES`), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
