//! # cardex - Wallet card background exporter
//!
//! Finds `cardBackgroundCombined@2x.png` inside every `.pkpass` bundle
//! under `~/Library/Passes/Cards`, drops content already exported, and
//! copies the rest into `~/Desktop/Cards` as `1.png`, `2.png`, ...

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod hash;
pub mod index;
pub mod logging;
pub mod platform;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use types::{CandidateFile, ContentDigest, ExportError, RunOutcome, RunStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
