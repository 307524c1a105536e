//! Integration test utilities for the board server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API, both raw over HTTP and through the board client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
