//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document on
//! stdout; failures use the error object from [`format_error`].

use anyhow::{Context, Result};
use gecos_common::OrganizationalUnit;
use serde_json::{Value, json};

use crate::application::services::LinkStatus;
use crate::domain::error::WorkflowError;
use crate::domain::step::{Outcome, PipelineReport};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

fn error_value(error: &WorkflowError) -> Value {
    json!({
        "code": error.code(),
        "message": error.to_string(),
        "field": error.field_hint(),
    })
}

/// Builds the JSON document for a finished pipeline.
#[must_use]
pub fn report_value(report: &PipelineReport) -> Value {
    let steps: Vec<Value> = report
        .board
        .entries()
        .map(|(step, status)| {
            json!({
                "step": step,
                "label": step.label(report.direction),
                "status": status,
            })
        })
        .collect();
    let (outcome, step, error) = match &report.outcome {
        Outcome::Success => ("success", None, Value::Null),
        Outcome::Failed { step, error } => ("failed", Some(*step), error_value(error)),
        Outcome::Canceled { step } => ("canceled", Some(*step), Value::Null),
    };
    json!({
        "direction": report.direction,
        "outcome": outcome,
        "step": step,
        "error": error,
        "node_name": report.node_name,
        "steps": steps,
    })
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &PipelineReport) -> Result<String> {
    serde_json::to_string_pretty(&report_value(report)).context("JSON serialization failed")
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_status(status: &LinkStatus) -> Result<String> {
    serde_json::to_string_pretty(status).context("JSON serialization failed")
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_ous(ous: &[OrganizationalUnit]) -> Result<String> {
    serde_json::to_string_pretty(&json!({ "ous": ous })).context("JSON serialization failed")
}
