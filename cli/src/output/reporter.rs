//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.
//!
//! On a TTY each in-progress step is a spinner; otherwise one line per
//! transition is printed.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::domain::step::{Direction, Step, StepStatus};
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// A reporter built with `visible = false` (JSON mode) swallows every
/// event; the final report is rendered by the caller instead.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    visible: bool,
    link_label: RefCell<String>,
    register_label: RefCell<String>,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext, visible: bool) -> Self {
        Self {
            ctx,
            visible: visible && !ctx.quiet,
            link_label: RefCell::new(Step::Link.label(Direction::Connect).to_string()),
            register_label: RefCell::new(Step::Register.label(Direction::Connect).to_string()),
            spinner: RefCell::new(None),
        }
    }

    fn label(&self, step: Step) -> String {
        match step {
            Step::Link => self.link_label.borrow().clone(),
            Step::Register => self.register_label.borrow().clone(),
            other => other.label(Direction::Connect).to_string(),
        }
    }

    /// Runs `f` with any active spinner hidden, for interactive prompts.
    pub fn suspend<T>(&self, f: impl FnOnce() -> T) -> T {
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    fn print_line(&self, mark: &str, label: &str) {
        println!("  {mark} {label}");
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step_status(&self, step: Step, status: StepStatus) {
        if !self.visible {
            return;
        }
        let label = self.label(step);
        let styles = &self.ctx.styles;
        let active = self.spinner.borrow_mut().take();
        match (status, active) {
            (StepStatus::Pending, active) => {
                *self.spinner.borrow_mut() = active;
            }
            (StepStatus::InProgress, _) => {
                if self.ctx.show_progress() {
                    *self.spinner.borrow_mut() = Some(progress::spinner(&label));
                } else {
                    self.print_line(&"→".style(styles.status(status)).to_string(), &label);
                }
            }
            (StepStatus::Done, Some(pb)) => progress::finish_ok(&pb, &label),
            (StepStatus::Error, Some(pb)) => progress::finish_error(&pb, &label),
            (StepStatus::Canceled, Some(pb)) => {
                progress::finish_canceled(&pb, &format!("{label} (canceled)"));
            }
            (StepStatus::Done, None) => {
                self.print_line(&"✓".style(styles.status(status)).to_string(), &label);
            }
            (StepStatus::Error, None) => {
                self.print_line(&"✗".style(styles.status(status)).to_string(), &label);
            }
            (StepStatus::Canceled, None) => {
                self.print_line(
                    &"⊘".style(styles.status(status)).to_string(),
                    &format!("{label} (canceled)"),
                );
            }
        }
    }

    fn set_link_label(&self, label: &str) {
        *self.link_label.borrow_mut() = label.to_string();
    }

    fn set_register_label(&self, label: &str) {
        *self.register_label.borrow_mut() = label.to_string();
    }

    fn warn(&self, message: &str) {
        if !self.visible {
            return;
        }
        let line = format!("    {} {message}", "⚠".style(self.ctx.styles.warning));
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}
