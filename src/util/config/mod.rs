//! use-literals configuration system
//!
//! Rule severities and analysis limits, loaded from TOML.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. `--config <FILE>`
//! 2. USE_LITERALS_CONFIG environment variable
//! 3. Project-level (./use-literals.toml)
//! 4. User-level (~/.config/use-literals/config.toml)
//! 5. Default values
//! ```
//!
//! # Example
//!
//! ```rust
//! use use_literals::util::config::LintConfig;
//! use use_literals::util::diagnostic::{LintLevel, RuleId};
//!
//! let config = LintConfig::from_toml_str(
//!     r#"
//!     [rules]
//!     use_empty_string_literal = "error"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.level_for(RuleId::EmptyString.descriptor()), LintLevel::Error);
//! assert_eq!(config.level_for(RuleId::Default.descriptor()), LintLevel::Warn);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::frontend::const_eval::DEFAULT_MAX_DEPTH;
use crate::util::diagnostic::codes::canonical_rule_name;
use crate::util::diagnostic::{LintLevel, RuleDescriptor};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "USE_LITERALS_CONFIG";

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "use-literals.toml";

/// Lint configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Per-rule levels, keyed by rule code or name
    #[serde(default)]
    pub rules: IndexMap<String, LintLevel>,
    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum initializer nesting depth
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Evaluate declarators in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_parallel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: true,
        }
    }
}

impl LintConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LintConfig = toml::from_str(content)?;
        config.validate()?;
        config.warn_unknown_rules();
        Ok(config)
    }

    /// Reject settings that would make every initializer unfoldable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "analysis.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a TOML file, creating parent directories
    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        fs::write(path, self.to_toml_string()?).map_err(io_error)
    }

    /// Effective level for a rule: the last matching entry wins, else the rule default
    pub fn level_for(
        &self,
        descriptor: &RuleDescriptor,
    ) -> LintLevel {
        self.rules
            .iter()
            .rev()
            .find(|(key, _)| {
                RuleDescriptor::find(key).is_some_and(|found| found.id == descriptor.id)
            })
            .map(|(_, level)| *level)
            .unwrap_or(descriptor.default_level)
    }

    /// Override one rule's level
    pub fn set_level(
        &mut self,
        rule: &str,
        level: LintLevel,
    ) {
        self.rules.insert(canonical_rule_name(rule), level);
    }

    fn warn_unknown_rules(&self) {
        for key in self.rules.keys() {
            if RuleDescriptor::find(key).is_none() {
                warn!("Ignoring unknown rule `{}` in configuration", key);
            }
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("use-literals"));
    }

    // Fallback to ~/.config/use-literals
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("use-literals"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("use-literals"));
    }

    None
}

/// Get the user config file path (~/.config/use-literals/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Candidate config locations, highest priority first
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Explicit `--config` path; must exist
    pub explicit: Option<PathBuf>,
    /// Path from the environment variable; must exist
    pub env: Option<PathBuf>,
    /// Project-level file; used when present
    pub project: Option<PathBuf>,
    /// User-level file; used when present
    pub user: Option<PathBuf>,
}

impl ConfigSources {
    /// Sources derived from the process environment and working directory
    pub fn from_env(explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            env: std::env::var_os(CONFIG_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            project: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            user: get_config_path(),
        }
    }

    /// Load the highest-priority config
    pub fn load(&self) -> Result<LintConfig, ConfigError> {
        if let Some(path) = self.explicit.as_ref().or(self.env.as_ref()) {
            return LintConfig::load(path);
        }
        for path in [&self.project, &self.user].into_iter().flatten() {
            if path.is_file() {
                return LintConfig::load(path);
            }
        }
        debug!("No config file found, using defaults");
        Ok(LintConfig::default())
    }
}

/// Discover and load configuration
pub fn discover(explicit: Option<&Path>) -> Result<LintConfig, ConfigError> {
    ConfigSources::from_env(explicit).load()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
