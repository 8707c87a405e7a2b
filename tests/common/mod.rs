//! Common test utilities and helpers
//!
//! Shared by the integration tests: a recording command runner and helpers
//! for building strategies against it.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_helpers;
