//! Configuration management

use crate::types::ExportError;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Where Wallet keeps installed passes, relative to the home directory
pub const SOURCE_SUBDIR: &str = "Library/Passes/Cards";

/// Export folder, relative to the home directory
pub const DESTINATION_SUBDIR: &str = "Desktop/Cards";

/// Directory-name suffix of a pass bundle
pub const BUNDLE_SUFFIX: &str = ".pkpass";

/// The card background asset inside each bundle
pub const TARGET_NAME: &str = "cardBackgroundCombined@2x.png";

/// Extension of admitted files in the destination
pub const IMAGE_EXTENSION: &str = "png";

/// Command-line interface
///
/// Paths and patterns are fixed; the flags only tune logging and the
/// final reveal step.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cardex")]
#[command(version)]
#[command(about = "Export Wallet card backgrounds to ~/Desktop/Cards", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Do not open the destination folder when finished
    #[arg(long)]
    pub no_reveal: bool,
}

impl Cli {
    /// Log filter directive implied by -v / -q
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root holding the pass bundles
    pub source: PathBuf,

    /// Flat, numbered output folder
    pub destination: PathBuf,

    /// Suffix identifying a bundle directory
    pub bundle_suffix: String,

    /// Exact base name of the asset to export
    pub target_name: String,

    /// Extension used for output files and destination hashing
    pub image_extension: String,

    /// Open the destination when the run completes
    pub reveal: bool,
}

impl Config {
    /// Fixed layout rooted at the given home directory
    pub fn for_home(home: &Path) -> Self {
        Self {
            source: home.join(SOURCE_SUBDIR),
            destination: home.join(DESTINATION_SUBDIR),
            bundle_suffix: BUNDLE_SUFFIX.to_string(),
            target_name: TARGET_NAME.to_string(),
            image_extension: IMAGE_EXTENSION.to_string(),
            reveal: true,
        }
    }

    /// Fixed layout rooted at the current user's home directory
    pub fn resolve() -> Result<Self, ExportError> {
        let home = dirs::home_dir()
            .ok_or_else(|| ExportError::Config("Cannot determine home directory".to_string()))?;
        Ok(Self::for_home(&home))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.bundle_suffix.is_empty() {
            return Err(ExportError::Config(
                "Bundle suffix cannot be empty".to_string(),
            ));
        }

        if self.target_name.is_empty() {
            return Err(ExportError::Config("Target name cannot be empty".to_string()));
        }

        if self.image_extension.is_empty() || self.image_extension.starts_with('.') {
            return Err(ExportError::Config(format!(
                "Invalid image extension: {:?}",
                self.image_extension
            )));
        }

        if self.source == self.destination {
            return Err(ExportError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = ExportError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mut config = Config::resolve()?;
        config.reveal = !cli.no_reveal;
        config.validate()?;
        Ok(config)
    }
}
