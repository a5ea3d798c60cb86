//! Application runtime composition modules.

pub(crate) mod config_runtime;
pub(crate) mod progress_manager;
pub(crate) mod terminal;
