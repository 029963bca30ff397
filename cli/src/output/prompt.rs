//! Interactive prompts built on dialoguer.

use anyhow::Result;

use crate::application::ports::CertificatePrompt;
use crate::output::reporter::TerminalReporter;

/// Asks for the validation certificate URL while the progress view is
/// paused.
///
/// A URL given up front (`--cert-url`) is returned without asking. In
/// non-interactive mode with no preset URL, the prompt counts as dismissed.
pub struct TerminalCertificatePrompt<'a> {
    reporter: &'a TerminalReporter<'a>,
    preset: Option<String>,
    interactive: bool,
}

impl<'a> TerminalCertificatePrompt<'a> {
    #[must_use]
    pub fn new(reporter: &'a TerminalReporter<'a>, preset: Option<String>, interactive: bool) -> Self {
        Self {
            reporter,
            preset,
            interactive,
        }
    }
}

impl CertificatePrompt for TerminalCertificatePrompt<'_> {
    fn certificate_url(&self) -> Result<Option<String>> {
        if let Some(url) = self.preset.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(Some(url.to_string()));
        }
        if !self.interactive {
            return Ok(None);
        }
        let url: String = self.reporter.suspend(|| {
            dialoguer::Input::<String>::new()
                .with_prompt("Validation certificate URL (empty to cancel)")
                .allow_empty(true)
                .interact_text()
        })?;
        Ok(Some(url).filter(|u| !u.trim().is_empty()))
    }
}

/// Reads a value from the user unless `current` already has one.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails (e.g. no TTY available).
pub fn text_or_prompt(current: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match current.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v),
        None if interactive => Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

/// Like [`text_or_prompt`] with hidden input.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails (e.g. no TTY available).
pub fn password_or_prompt(current: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match current.filter(|v| !v.is_empty()) {
        Some(v) => Ok(v),
        None if interactive => Ok(dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?),
        None => Ok(String::new()),
    }
}
