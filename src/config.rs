use serde::{Deserialize, Serialize};

/// Default path finder cutoff, in hops
pub const DEFAULT_MAX_PATH_HOPS: usize = 10;

/// Default fragmentation ratio above which a VLAN gets a priority recommendation
pub const DEFAULT_PRIORITY_THRESHOLD: f64 = 0.5;

/// How the analyzer treats device references that do not resolve
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Drop dangling link endpoints and VLAN members, logging each one
    #[default]
    Permissive,
    /// Refuse to analyze a topology holding dangling references
    Strict,
}

/// Analyzer configuration, usually loaded from YAML
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub validation_mode: ValidationMode,
    pub max_path_hops: usize,
    /// Analyze VLANs on the rayon thread pool
    pub parallel: bool,
    pub priority_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_path_hops == 0 {
            return Err(ConfigError::InvalidPathHops(self.max_path_hops));
        }

        if !(0.0..=1.0).contains(&self.priority_threshold) {
            return Err(ConfigError::InvalidThreshold(self.priority_threshold));
        }

        if let Some(level) = &self.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ConfigError::InvalidLogLevel(level.clone()));
            }
        }

        Ok(())
    }

    pub fn strict() -> Self {
        Self {
            validation_mode: ValidationMode::Strict,
            ..Self::default()
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::Permissive,
            max_path_hops: DEFAULT_MAX_PATH_HOPS,
            parallel: false,
            priority_threshold: DEFAULT_PRIORITY_THRESHOLD,
            log_level: None,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_path_hops must be at least 1, got {0}")]
    InvalidPathHops(usize),
    #[error("priority_threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
