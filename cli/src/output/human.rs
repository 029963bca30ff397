//! Human-readable terminal renderer.

use std::path::Path;

use gecos_common::OrganizationalUnit;
use owo_colors::OwoColorize as _;

use crate::application::services::LinkStatus;
use crate::domain::config::AssistantConfig;
use crate::domain::step::{Direction, Outcome, PipelineReport};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Summarize a finished pipeline. Step lines were already printed by
    /// the progress reporter; errors go to stderr even when quiet.
    pub fn render_report(&self, report: &PipelineReport) {
        match &report.outcome {
            Outcome::Success => {
                let verb = match report.direction {
                    Direction::Connect => "connected to",
                    Direction::Disconnect => "disconnected from",
                };
                println!();
                self.ctx.success(&format!("Workstation {verb} GECOS CC"));
                if let Some(node) = &report.node_name {
                    self.ctx.kv("Node name:", node);
                }
            }
            Outcome::Failed { step, error } => {
                self.ctx.error(&format!(
                    "{} failed: {error}",
                    step.label(report.direction)
                ));
                if let Some(flag) = error.field_hint() {
                    self.ctx.error(&format!("Set it with {flag} and try again."));
                }
            }
            Outcome::Canceled { step } => {
                self.ctx.warn(&format!(
                    "{} canceled. Nothing after this step was changed.",
                    step.label(report.direction)
                ));
            }
        }
    }

    /// Render the link status.
    pub fn render_status(&self, status: &LinkStatus) {
        match status {
            LinkStatus::NotLinked => {
                self.ctx.kv("Status:", "not linked");
            }
            LinkStatus::Linked {
                url,
                login,
                node_name,
                workstation_name,
                organizational_unit,
                linked_at,
            } => {
                self.ctx.kv("Status:", &"linked".style(self.ctx.styles.success).to_string());
                self.ctx.kv("Control Center:", url);
                self.ctx.kv("Login:", login);
                self.ctx.kv("Node name:", node_name);
                if !workstation_name.is_empty() {
                    self.ctx.kv("Workstation:", workstation_name);
                }
                if !organizational_unit.is_empty() {
                    self.ctx.kv("OU:", organizational_unit);
                }
                self.ctx.kv("Linked at:", &linked_at.to_rfc3339());
            }
        }
    }

    /// Render OU search results, one per line.
    pub fn render_ous(&self, ous: &[OrganizationalUnit]) {
        if ous.is_empty() {
            self.ctx.info("No organizational unit matches.");
            return;
        }
        for ou in ous {
            println!("  {}  {}", ou.id.style(self.ctx.styles.dim), ou.label);
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &AssistantConfig, path: &Path) {
        let header = self.ctx.styles.header;
        let bold = self.ctx.styles.bold;
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(header)
        );
        println!();
        println!("  {}", "Paths:".style(bold));
        let paths = &config.paths;
        for (key, value) in [
            ("validation_certificate:", &paths.validation_certificate),
            ("client_config:", &paths.client_config),
            ("control_file:", &paths.control_file),
            ("knife_config:", &paths.knife_config),
            ("client_identity:", &paths.client_identity),
            ("client_wrapper:", &paths.client_wrapper),
            ("access_data:", &paths.access_data),
        ] {
            println!("    {key:<24} {}", value.display());
        }
        println!();
        println!("  {}", "Commands:".style(bold));
        let commands = &config.commands;
        println!("    {:<24} {}", "link:", commands.link.join(" "));
        println!("    {:<24} {}", "service_start:", commands.service_start.join(" "));
        println!("    {:<24} {}", "service_stop:", commands.service_stop.join(" "));
        println!("    {:<24} {}", "knife:", commands.knife);
        println!("    {:<24} {}", "locale:", commands.locale);
        println!("    {:<24} {}s", "timeout:", commands.timeout_secs);
        println!();
        println!("  {}", "Ownership:".style(bold));
        let own = &config.ownership;
        println!("    {:<24} {}:{}", "owner:", own.owner, own.group);
        println!("    {:<24} {}", "secure_mode:", own.secure_mode);
        println!("    {:<24} {}", "client_config_mode:", own.client_config_mode);
        println!("    {:<24} {}", "control_file_mode:", own.control_file_mode);
        println!("    {:<24} {}", "knife_config_mode:", own.knife_config_mode);
        println!();
        println!("  {}", "Network:".style(bold));
        println!("    {:<24} {}s", "http_timeout:", config.network.http_timeout_secs);
        println!(
            "    {:<24} {}",
            "accept_invalid_certs:", config.network.accept_invalid_certs
        );
        println!();
        println!("  {}", "Environment:".style(bold));
        for var in ["GECOS_ASSISTANT_CONFIG", "GECOS_ASSISTANT_LOG", "NO_COLOR"] {
            println!(
                "    {:<24} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
