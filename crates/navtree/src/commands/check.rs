//! `navtree check` command implementation.

use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_model::{LintLevel, validate};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Navigation data file to validate.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat warning-level diagnostics as failures (overrides config).
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or parsing fails, or when the
    /// document has error-level diagnostics (warnings too under
    /// `--deny-warnings`).
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            deny_warnings: self.deny_warnings.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        match &config.config_path {
            Some(path) => info!("using configuration from {}", path.display()),
            None => info!("no configuration file found, using defaults"),
        }

        let parsed = navtree_data::read_file(&self.file)?;
        for warning in &parsed.warnings {
            output.warning(&format!("warning: {warning}"));
        }

        let diagnostics = validate(&parsed.data, &config.lint_config());
        for diagnostic in &diagnostics {
            match diagnostic.level {
                LintLevel::Error => output.error(&diagnostic.to_string()),
                _ => output.warning(&diagnostic.to_string()),
            }
        }

        let errors = diagnostics
            .iter()
            .filter(|d| d.level == LintLevel::Error)
            .count();
        let warnings = diagnostics.len() - errors + parsed.warnings.len();

        if errors > 0 || (warnings > 0 && config.check.deny_warnings) {
            Err(CliError::Validation(format!(
                "{}: {errors} error(s), {warnings} warning(s)",
                self.file.display()
            )))
        } else {
            output.success(&format!(
                "{}: {} nodes, {} index entries, {warnings} warning(s)",
                self.file.display(),
                parsed.data.tree.len(),
                parsed.data.index.len()
            ));
            Ok(())
        }
    }
}
