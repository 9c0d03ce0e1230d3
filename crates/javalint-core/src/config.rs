//! Configuration types for javalint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for javalint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Suppression conventions honored by every rule.
    #[serde(default)]
    pub suppression: SuppressionConfig,

    /// Separately compiled types that are referenced but not part of the
    /// analyzed source tree.
    #[serde(default)]
    pub external_types: Vec<ExternalTypeConfig>,

    /// Per-rule configurations, keyed by rule identifier or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of compilation units evaluated in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Host Java feature release (e.g. 8, 11, 17).
    ///
    /// When unset the release is detected from `$JAVA_HOME/release`.
    #[serde(default)]
    pub release: Option<u32>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/build/**".to_string(), "**/target/**".to_string()],
            respect_gitignore: true,
            parallelism: None,
            release: None,
        }
    }
}

/// Suppression conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionConfig {
    /// Fully-qualified annotations whose `value` lists suppressed rules.
    #[serde(default = "default_suppression_annotations")]
    pub annotations: Vec<String>,

    /// Identifiers that suppress every rule (e.g. `"all"`).
    #[serde(default)]
    pub wildcards: Vec<String>,

    /// Whether `// javalint: allow(...)` comments suppress rules.
    #[serde(default = "default_true")]
    pub comment_directives: bool,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            annotations: default_suppression_annotations(),
            wildcards: Vec::new(),
            comment_directives: true,
        }
    }
}

/// A type compiled outside the analyzed tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalTypeConfig {
    /// Fully-qualified name (nested types joined with `.`).
    pub name: String,

    /// Declaration kind: `class`, `interface`, `enum`, `record`, or `annotation`.
    #[serde(default)]
    pub kind: Option<String>,

    /// Fully-qualified annotations retained on the type.
    ///
    /// `None` means annotation information was not retained.
    #[serde(default)]
    pub annotations: Option<Vec<String>>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_suppression_annotations() -> Vec<String> {
    vec!["java.lang.SuppressWarnings".to_string()]
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
