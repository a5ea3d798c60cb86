//! Shared helpers for integration suites.

#[allow(dead_code)]
pub mod socket_guard;
