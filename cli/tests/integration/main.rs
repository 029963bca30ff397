//! Integration tests for the gecos-assistant CLI
//!
//! These tests spawn the actual binary or talk to a local HTTP server.
//! They are slower and should be run separately from unit tests.

mod cli_tests;
mod directory_client;
