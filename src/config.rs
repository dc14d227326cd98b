use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analyzer::{CommitAnalyzer, DEFAULT_MAJOR_PATTERN, DEFAULT_MINOR_PATTERN};
use crate::error::{NextverError, Result};
use crate::strategy::{
    BranchRule, BumpStrategy, Strategy, DEFAULT_BUILD_METADATA_TEMPLATE,
    DEFAULT_RELEASE_BRANCHES_PATTERN,
};

/// Represents the complete configuration for git-nextver.
///
/// Contains the commit classification patterns and the ordered branch rule
/// list. Without a configuration file the defaults implement the
/// conventional commits workflow: clean bumps on release branches, build
/// metadata pseudo versions everywhere else.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_major_pattern", alias = "majorPattern")]
    pub major_pattern: String,

    #[serde(default = "default_minor_pattern", alias = "minorPattern")]
    pub minor_pattern: String,

    #[serde(default = "default_rule_configs")]
    pub rules: Vec<RuleConfig>,
}

/// One branch rule as written in configuration.
///
/// Field names accept both snake_case (TOML files) and camelCase (inline
/// JSON rules on the command line).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    #[serde(default = "default_branches_pattern", alias = "branchesPattern")]
    pub branches_pattern: String,

    #[serde(default = "default_strategy")]
    pub strategy: String,

    #[serde(default, alias = "preReleaseTemplate")]
    pub pre_release_template: String,

    #[serde(default, alias = "preReleaseOverwrite")]
    pub pre_release_overwrite: bool,

    #[serde(default, alias = "buildMetadataTemplate")]
    pub build_metadata_template: String,
}

/// Returns the default breaking change pattern.
fn default_major_pattern() -> String {
    DEFAULT_MAJOR_PATTERN.to_string()
}

/// Returns the default minor change pattern.
fn default_minor_pattern() -> String {
    DEFAULT_MINOR_PATTERN.to_string()
}

/// Returns the pattern matching every branch.
fn default_branches_pattern() -> String {
    ".*".to_string()
}

/// Returns the default bump strategy name.
fn default_strategy() -> String {
    "AUTO".to_string()
}

/// Returns the default rule list: automatic bumps on release branches and
/// build metadata pseudo versions on every other branch.
fn default_rule_configs() -> Vec<RuleConfig> {
    vec![
        RuleConfig {
            branches_pattern: DEFAULT_RELEASE_BRANCHES_PATTERN.to_string(),
            ..RuleConfig::default()
        },
        RuleConfig {
            build_metadata_template: DEFAULT_BUILD_METADATA_TEMPLATE.to_string(),
            ..RuleConfig::default()
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            major_pattern: default_major_pattern(),
            minor_pattern: default_minor_pattern(),
            rules: default_rule_configs(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            branches_pattern: default_branches_pattern(),
            strategy: default_strategy(),
            pre_release_template: String::new(),
            pre_release_overwrite: false,
            build_metadata_template: String::new(),
        }
    }
}

impl Config {
    /// Compile the configuration into a runnable strategy.
    ///
    /// Invalid patterns or templates surface here as configuration errors,
    /// before any git invocation.
    pub fn to_strategy(&self) -> Result<BumpStrategy> {
        let analyzer = CommitAnalyzer::from_patterns(&self.major_pattern, &self.minor_pattern)?;
        let rules = self
            .rules
            .iter()
            .map(RuleConfig::to_rule)
            .collect::<Result<Vec<_>>>()?;
        Ok(BumpStrategy::new(analyzer, rules))
    }
}

impl RuleConfig {
    /// Compile this rule, parsing the strategy name leniently
    pub fn to_rule(&self) -> Result<BranchRule> {
        BranchRule::new(
            Strategy::parse(&self.strategy),
            &self.branches_pattern,
            &self.pre_release_template,
            self.pre_release_overwrite,
            &self.build_metadata_template,
        )
    }

    /// Parse an inline JSON rule object as passed on the command line
    pub fn from_json(json: &str) -> Result<RuleConfig> {
        serde_json::from_str(json)
            .map_err(|e| NextverError::config(format!("invalid branch strategy '{}': {}", json, e)))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nextver.toml` in current directory
/// 3. `nextver/nextver.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./nextver.toml").exists() {
        fs::read_to_string("./nextver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("nextver").join("nextver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| NextverError::config(format!("invalid configuration: {}", e)))
}
