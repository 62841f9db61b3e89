use config::{Config as ConfigLoader, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    /// Text network files processed when no data source is given on the command line.
    pub inputs: Vec<String>,
    pub channel_capacity: usize,
    /// Upper bound on networks solved at the same time.
    pub max_parallel: usize,
    pub print_matrices: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    pub networks: usize,
    pub vertex_count: usize,
    pub edge_density: f64,
    pub max_capacity: i64,
    pub max_cost: i64,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub runner: RunnerConfig,
    pub generator: GeneratorConfig,
}

/// Loads `crates/executor/Config.toml` under the working directory, falling back
/// to the copy next to this crate's manifest, then applies `EXECUTOR__*` overrides.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    let workspace_path: PathBuf = base_path
        .join("crates")
        .join("executor")
        .join("Config.toml");
    let config_file_path = if workspace_path.exists() {
        workspace_path
    } else {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("Config.toml")
    };

    load_config_from(&config_file_path)
}

/// Loads configuration from `path` and environment variables.
///
/// # Errors
/// Returns `Error::ConfigLoadError` if the file is missing or malformed, or if
/// `runner.max_parallel` or `runner.channel_capacity` is zero.
pub fn load_config_from(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .try_parsing(true)
                .separator("__"),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    if app_config.runner.max_parallel == 0 || app_config.runner.channel_capacity == 0 {
        return Err(Error::ConfigLoadError(
            "runner.max_parallel and runner.channel_capacity must be positive".to_string(),
        ));
    }

    Ok(app_config)
}
