//! Configuration file model and logging initialization for the expression engine.
//!
//! A configuration file is plain TOML:
//!
//! ```toml
//! [access]
//! minimum = "protected"
//!
//! [imports]
//! classes = ["java.util.ArrayList"]
//! packages = ["java.util"]
//!
//! [evaluation]
//! dynamic_typing = true
//!
//! [logging]
//! level = "jexpr_eval=debug"
//! json = false
//! ```
//!
//! Unknown keys are rejected so that typos surface as errors instead of silently falling back to
//! defaults.

use std::path::{Path, PathBuf};
use std::sync::Once;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing_subscriber::prelude::*;

/// Environment variable that overrides config discovery.
pub const JEXPR_CONFIG_ENV_VAR: &str = "JEXPR_CONFIG_PATH";

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").expect("valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpressionConfig {
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub imports: ImportsConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Least restrictive access modifier a member may have to be visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    Public,
    Protected,
    PackagePrivate,
    #[default]
    Private,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Members below this level are hidden from completions and resolution.
    #[serde(default)]
    pub minimum: AccessLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportsConfig {
    /// Fully qualified class names usable by their simple name.
    #[serde(default)]
    pub classes: Vec<String>,

    /// Packages whose top-level classes are usable by their simple name.
    #[serde(default)]
    pub packages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Resolve members by runtime types instead of declared types.
    #[serde(default)]
    pub dynamic_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective filter: the configured level, with `RUST_LOG` directives appended when set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid value for `{key}`: {message}")]
    Invalid { key: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The `Display` form embeds a source snippet; the message alone is enough.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl ExpressionConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: ExpressionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects import entries that are not dotted Java names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = self
            .imports
            .classes
            .iter()
            .map(|name| ("imports.classes", name))
            .chain(
                self.imports
                    .packages
                    .iter()
                    .map(|name| ("imports.packages", name)),
            );
        for (key, name) in entries {
            if !QUALIFIED_NAME.is_match(name) {
                return Err(ConfigError::Invalid {
                    key: key.to_owned(),
                    message: format!("`{name}` is not a qualified name"),
                });
            }
        }
        Ok(())
    }
}

/// Discover the configuration file for a directory.
///
/// Search order:
/// 1) `JEXPR_CONFIG_PATH` (absolute or relative to `root`)
/// 2) `jexpr.toml` in `root`
/// 3) `.jexpr.toml` in `root`
pub fn discover_config_path(root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(JEXPR_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            root.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["jexpr.toml", ".jexpr.toml"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the configuration for a directory.
///
/// If no config is present, returns [`ExpressionConfig::default`] and `None`.
pub fn load_for_dir(root: &Path) -> Result<(ExpressionConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(root) else {
        return Ok((ExpressionConfig::default(), None));
    };

    let config = ExpressionConfig::load_from_path(&path)?;
    Ok((config, Some(path)))
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber. Only the first call has an effect.
///
/// Returns `true` if this call installed the subscriber.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        // `cargo test` output capture only works with `TestWriter`.
        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        installed = tracing::subscriber::set_global_default(subscriber).is_ok();
        if installed {
            tracing::debug!(target: "jexpr.config", level = %config.level, json = config.json, "tracing initialized");
        }
    });
    installed
}
