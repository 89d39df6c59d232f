use crate::core::matcher::{DEFAULT_FRAMEWORK_PATTERN, RegexMatcher, SubstringMatcher};
use crate::core::operations::{BacktraceCleaner, SubstitutionRule};
use crate::utils::error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub framework: FrameworkConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<SubstitutionConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkConfig {
    #[serde(default)]
    pub strategy: MatchStrategy,
    #[serde(default = "default_framework_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionConfig {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    #[default]
    Regex,
    Substring,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_true() -> bool {
    true
}

fn default_framework_pattern() -> String {
    DEFAULT_FRAMEWORK_PATTERN.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::Regex,
            pattern: default_framework_pattern(),
            keywords: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
        }
    }
}

impl SubstitutionConfig {
    /// Parse the command line form `PATTERN=REPLACEMENT`.
    ///
    /// The split happens at the last `=`, so patterns may contain `=` but
    /// replacements may not. A missing `=` means "replace with nothing".
    pub fn parse_arg(arg: &str) -> AppResult<Self> {
        let (pattern, replacement) = arg.rsplit_once('=').unwrap_or((arg, ""));
        if pattern.is_empty() {
            return Err(AppError::Config(format!(
                "Substitution '{}' has an empty pattern",
                arg
            )));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        })
    }

    pub fn compile(&self) -> AppResult<SubstitutionRule> {
        Regex::new(&self.pattern)
            .map(|regex| SubstitutionRule::from_regex(regex, self.replacement.as_str()))
            .map_err(|e| AppError::Pattern(format!("substitution '{}': {}", self.pattern, e)))
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_custom(&path)
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            AppError::Io(format!("Failed to read {}: {}", config_path.display(), e))
        })?;

        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        match self.framework.strategy {
            MatchStrategy::Regex => {
                if self.framework.pattern.is_empty() {
                    return Err(AppError::Config(
                        "Framework pattern cannot be empty".to_string(),
                    ));
                }
                Regex::new(&self.framework.pattern)
                    .map_err(|e| AppError::Pattern(format!("framework pattern: {}", e)))?;
            }
            MatchStrategy::Substring => {
                if self.framework.keywords.iter().all(|k| k.is_empty()) {
                    return Err(AppError::Config(
                        "Substring strategy needs at least one framework keyword".to_string(),
                    ));
                }
            }
        }

        for substitution in &self.substitutions {
            substitution.compile()?;
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown log level '{}', expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Build a cleaner from the configured matcher and rules, followed by `extra` rules
    pub fn build_cleaner(&self, extra: &[SubstitutionConfig]) -> AppResult<BacktraceCleaner> {
        let framework = &self.framework;
        let mut cleaner = match framework.strategy {
            MatchStrategy::Regex => BacktraceCleaner::new(
                RegexMatcher::with_case(&framework.pattern, framework.case_sensitive)?,
            ),
            MatchStrategy::Substring => BacktraceCleaner::new(SubstringMatcher::new(
                framework.keywords.iter().cloned(),
                framework.case_sensitive,
            )),
        };

        for substitution in self.substitutions.iter().chain(extra) {
            cleaner.push_rule(substitution.compile()?);
        }

        Ok(cleaner)
    }

    /// Write the configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tracesift")
            .join("config.toml")
    }
}
