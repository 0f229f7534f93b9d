//! `navkit build` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use navkit_config::{CliSettings, Config};
use navkit_site::{BuildError, build, search_feed};

use crate::error::CliError;
use crate::output::Output;

/// Name of the navigation tree output file.
const NAVIGATION_FILE: &str = "navigation.json";

/// Name of the search feed output file.
const SEARCH_FEED_FILE: &str = "search-feed.json";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover navkit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar definition file (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable verbose output (show per-fragment merge logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the build pipeline, or writing
    /// the output files fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            sidebars: self.sidebars,
            out_dir: self.out_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let nav = match build(&config) {
            Ok(nav) => nav,
            Err(BuildError::Validation(errors)) => {
                output.error(&format!(
                    "Navigation validation failed with {} error(s):",
                    errors.len()
                ));
                for error in &errors {
                    output.detail(&format!("  {error}"));
                }
                return Err(BuildError::Validation(errors).into());
            }
            Err(err) => return Err(err.into()),
        };

        fs::create_dir_all(&config.out_dir)?;

        let nav_path = config.out_dir.join(NAVIGATION_FILE);
        fs::write(&nav_path, serde_json::to_vec_pretty(&nav.sidebars)?)?;

        let flat = nav.flatten();
        let feed_path = config.out_dir.join(SEARCH_FEED_FILE);
        fs::write(&feed_path, serde_json::to_vec_pretty(&search_feed(&flat))?)?;

        output.success(&format!(
            "Built {} sidebar(s), {} node(s), {} known document(s)",
            nav.sidebars.len(),
            nav.sidebars.node_count(),
            nav.known_ids.len(),
        ));
        for fragment in &nav.fragments {
            let title = fragment.title.as_deref().unwrap_or("untitled");
            output.detail(&format!(
                "  merged {} ({title}): {} document(s)",
                fragment.name, fragment.documents
            ));
        }
        output.info(&format!("  {}", nav_path.display()));
        output.info(&format!("  {}", feed_path.display()));

        Ok(())
    }
}
