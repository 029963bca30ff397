//! Unit tests for the gecos-assistant CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod disconnect_service;
mod helpers;
mod ou_and_status;
mod property_tests;
