//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.intellisync/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::params::ParameterPatch;
use crate::core::state::DEFAULT_RESPONSE_DELAY;
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IntelliSyncConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub parameters: ParameterPatch,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_model: Option<String>,
    pub theme: Option<Theme>,
    pub response_delay_ms: Option<u64>,
    pub export_dir: Option<String>,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub theme: Option<Theme>,
    pub export_dir: Option<PathBuf>,
    pub response_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL_ID: &str = "gpt-4-turbo";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_id: String,
    pub theme: Theme,
    /// Startup overrides for the generation parameters.
    pub parameters: ParameterPatch,
    pub response_delay: Duration,
    pub export_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            theme: Theme::default(),
            parameters: ParameterPatch::default(),
            response_delay: DEFAULT_RESPONSE_DELAY,
            export_dir: PathBuf::from("."),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.intellisync/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".intellisync").join("config.toml"))
}

/// Load config from `~/.intellisync/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `IntelliSyncConfig::default()`.
pub fn load_config() -> Result<IntelliSyncConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(IntelliSyncConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path. A missing file yields defaults (and a
/// generated template); a malformed one is `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<IntelliSyncConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(IntelliSyncConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: IntelliSyncConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# IntelliSync Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_model = "gpt-4-turbo"     # gpt-4-turbo, gpt-3.5-turbo, claude-3-opus, gemini-pro
# theme = "dark"                    # "light" or "dark"
# response_delay_ms = 2000
# export_dir = "~/Downloads"        # Where transcript exports are written

# [parameters]
# temperature = 0.7                 # 0.0 - 2.0
# max_tokens = 2048                 # 100 - 4096
# top_p = 0.9                       # 0.0 - 1.0
# frequency_penalty = 0.0           # 0.0 - 2.0
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &IntelliSyncConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model_id = cli
        .model
        .clone()
        .or_else(|| std::env::var("INTELLISYNC_MODEL").ok())
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| {
            std::env::var("INTELLISYNC_THEME")
                .ok()
                .and_then(|s| Theme::parse(&s))
        })
        .or(config.general.theme)
        .unwrap_or_default();

    // Export dir: CLI → env → config → working directory
    let export_dir = cli
        .export_dir
        .clone()
        .or_else(|| std::env::var("INTELLISYNC_EXPORT_DIR").ok().map(PathBuf::from))
        .or_else(|| config.general.export_dir.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from("."));

    let response_delay = cli
        .response_delay_ms
        .or(config.general.response_delay_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_RESPONSE_DELAY);

    ResolvedConfig {
        model_id,
        theme,
        parameters: config.parameters,
        response_delay,
        export_dir,
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
