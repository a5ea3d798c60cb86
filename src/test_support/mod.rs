//! Shared helpers for in-crate unit tests.

pub mod socket_guard;
