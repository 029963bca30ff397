//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, secure
//! file writes, the Control Center HTTP client, network inventory, the link
//! record and embedded templates.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod command_runner;
pub mod config;
pub mod directory;
pub mod fs;
pub mod network;
pub mod state;
