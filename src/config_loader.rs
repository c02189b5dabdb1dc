use crate::config::AnalyzerConfig;
use color_eyre::eyre::Context;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse analyzer configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<AnalyzerConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .with_context(|| format!("Failed to open config file {}", config_path.display()))?;

    let config: AnalyzerConfig = serde_yaml::from_reader(file)
        .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

    config.validate()?;

    info!(
        "Validation mode: {:?}, path cutoff: {} hops, parallel: {}",
        config.validation_mode, config.max_path_hops, config.parallel
    );

    Ok(config)
}

/// Load the config file if one was given, defaults otherwise
pub fn load_config_or_default(config_path: Option<&Path>) -> Result<AnalyzerConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(AnalyzerConfig::default()),
    }
}
