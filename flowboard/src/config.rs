//! Configuration system for the Flowboard CLI.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/flowboard/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;

use crate::automation::DEFAULT_FUEL_MARGIN;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AppConfigFile {
    automation: AutomationFileConfig,
}

/// `[automation]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AutomationFileConfig {
    fuel_margin: Option<usize>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the Flowboard demo binary.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Flowboard kanban board with automation rules")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/flowboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra automation fuel beyond one unit per project rule.
    #[arg(long)]
    pub fuel_margin: Option<usize>,

    /// Print the demo outcome as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "FLOWBOARD_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Extra automation fuel beyond one unit per project rule.
    pub fuel_margin: usize,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fuel_margin: DEFAULT_FUEL_MARGIN,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. If no `--config` is given, the default path is tried and a
    /// missing file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &AppConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            fuel_margin: cli
                .fuel_margin
                .or(file.automation.fuel_margin)
                .unwrap_or(defaults.fuel_margin),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<AppConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(AppConfigFile::default());
        };
        config_dir.join("flowboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
