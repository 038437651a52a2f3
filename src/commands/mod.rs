//! User-facing commands

pub mod export;

pub use export::{notify_config_failure, run_export, SyncEngine};
