//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod access;
pub mod accounts;
pub mod chef;
pub mod config;
pub mod error;
pub mod step;
pub mod template;
pub mod workstation;

pub use access::{AccessData, validate_access_data};
pub use config::{AssistantConfig, CommandLine};
pub use error::{ConfigError, TemplateError, ValidationError, WorkflowError};
pub use step::{Direction, Outcome, PipelineReport, Step, StepBoard, StepStatus};
pub use workstation::{NetworkInterface, WorkstationData};
