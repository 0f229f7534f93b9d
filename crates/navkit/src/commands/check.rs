//! `navkit check` command implementation.
//!
//! Runs the full build pipeline but writes nothing, so authors can lint a
//! navigation change before committing it.

use std::path::PathBuf;

use clap::Args;
use navkit_config::{CliSettings, Config};
use navkit_site::{BuildError, build};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover navkit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar definition file (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the tree cannot be
    /// assembled, or validation reports any dangling reference.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            sidebars: self.sidebars,
            out_dir: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        match build(&config) {
            Ok(nav) => {
                output.success(&format!(
                    "Navigation is valid: {} sidebar(s), {} node(s)",
                    nav.sidebars.len(),
                    nav.sidebars.node_count(),
                ));
                Ok(())
            }
            Err(BuildError::Validation(errors)) => {
                output.error(&format!(
                    "Navigation validation failed with {} error(s):",
                    errors.len()
                ));
                for error in &errors {
                    output.detail(&format!("  {error}"));
                }
                Err(BuildError::Validation(errors).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
