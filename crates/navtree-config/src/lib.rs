//! Configuration management for navtree.
//!
//! Parses `navtree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [lint]
//! sorted-index = "error"    # off | warn | error
//! license-header = "warn"
//!
//! [check]
//! deny-warnings = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use navtree_model::{LintConfig, LintLevel, LintRule};
use serde::Deserialize;
use tracing::debug;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the deny-warnings flag.
    pub deny_warnings: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Lint level overrides, keyed by rule name.
    lint: BTreeMap<String, String>,
    /// Check command configuration.
    pub check: CheckConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `check` command configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckConfig {
    /// Treat warning-level diagnostics as failures.
    pub deny_warnings: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in the current directory
    /// and parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments
    /// to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            debug!("using configuration from {}", discovered.display());
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: PathBuf) -> Option<PathBuf> {
        let mut current = start;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(deny_warnings) = settings.deny_warnings {
            self.check.deny_warnings = deny_warnings;
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that every `[lint]` key names a known rule and every
    /// value a known level. Called automatically after loading from
    /// file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any entry is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, level) in &self.lint {
            name.parse::<LintRule>().map_err(|_| {
                ConfigError::Validation(format!("lint.{name}: unknown lint rule"))
            })?;
            level.parse::<LintLevel>().map_err(|_| {
                ConfigError::Validation(format!(
                    "lint.{name}: unknown level {level:?}, expected off, warn or error"
                ))
            })?;
        }
        Ok(())
    }

    /// Lower the `[lint]` table into the model's rule configuration.
    ///
    /// Entries that fail to parse are skipped; [`Config::validate`]
    /// rejects them before a loaded config gets here.
    #[must_use]
    pub fn lint_config(&self) -> LintConfig {
        let mut lint_config = LintConfig::new();
        for (name, level) in &self.lint {
            if let (Ok(rule), Ok(level)) = (name.parse(), level.parse()) {
                lint_config.set(rule, level);
            }
        }
        lint_config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(!config.check.deny_warnings);
        assert_eq!(
            config.lint_config().level(LintRule::SortedIndex),
            LintLevel::Warn
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.lint.is_empty());
        assert!(!config.check.deny_warnings);
    }

    #[test]
    fn test_parse_lint_table() {
        let toml = r#"
[lint]
sorted-index = "error"
license-header = "warn"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().unwrap();

        let lint_config = config.lint_config();
        assert_eq!(lint_config.level(LintRule::SortedIndex), LintLevel::Error);
        assert_eq!(lint_config.level(LintRule::LicenseHeader), LintLevel::Warn);
        // Untouched rules keep their defaults
        assert_eq!(lint_config.level(LintRule::SingleRoot), LintLevel::Error);
    }

    #[test]
    fn test_parse_check_section() {
        let toml = r#"
[check]
deny-warnings = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.check.deny_warnings);
    }

    #[test]
    fn test_validate_rejects_unknown_rule() {
        let toml = r#"
[lint]
no-such-rule = "warn"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("no-such-rule"));
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let toml = r#"
[lint]
sorted-index = "deny"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("sorted-index"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<Config, _> = toml::from_str("[serve]\nport = 1\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_deny_warnings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            deny_warnings: Some(true),
        });

        assert!(config.check.deny_warnings);
    }

    #[test]
    fn test_apply_cli_settings_empty_keeps_file_values() {
        let toml = r#"
[check]
deny-warnings = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.apply_cli_settings(&CliSettings::default());

        assert!(config.check.deny_warnings);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[lint]\nduplicate-index = \"error\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.lint_config().level(LintRule::DuplicateIndex),
            LintLevel::Error
        );
    }

    #[test]
    fn test_discover_config_walks_up_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[check]\ndeny-warnings = true\n").unwrap();
        let nested = dir.path().join("docs").join("html");
        std::fs::create_dir_all(&nested).unwrap();

        let discovered = Config::discover_config_from(nested).unwrap();

        assert_eq!(discovered, config_path);
    }

    #[test]
    fn test_discover_config_prefers_the_nearest_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = nested.join(CONFIG_FILENAME);
        std::fs::write(&nearest, "").unwrap();

        let discovered = Config::discover_config_from(nested).unwrap();

        assert_eq!(discovered, nearest);
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let err = Config::load(Some(Path::new("/nonexistent/navtree.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_path_invalid_lint_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[lint]\nbogus = \"warn\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_applies_cli_settings_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[check]\ndeny-warnings = false\n").unwrap();

        let settings = CliSettings {
            deny_warnings: Some(true),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(config.check.deny_warnings);
    }
}
