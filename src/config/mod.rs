pub mod cli;
pub mod toml_config;

pub use cli::CliArgs;
pub use toml_config::TomlConfig;

use crate::core::state::StorageKeys;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Effective settings: command line over config file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub keys: StorageKeys,
    pub in_memory: bool,
    pub verbose: bool,
    pub json_logs: bool,
}

impl ServiceConfig {
    pub fn resolve(args: &CliArgs, file: TomlConfig) -> Self {
        let defaults = StorageKeys::default();
        Self {
            host: args
                .host
                .clone()
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            data_dir: args
                .data_dir
                .clone()
                .or(file.storage.data_dir)
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            keys: StorageKeys {
                servos: file.storage.servos_file.unwrap_or(defaults.servos),
                presets: file.storage.presets_file.unwrap_or(defaults.presets),
            },
            in_memory: args.in_memory || file.storage.in_memory.unwrap_or(false),
            verbose: args.verbose || file.logging.verbose.unwrap_or(false),
            json_logs: args.json_logs || file.logging.json.unwrap_or(false),
        }
    }

    /// Reads the config file named on the command line, if any, and merges it.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        file.validate()?;

        let config = Self::resolve(args, file);
        config.validate()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_path("data_dir", &self.data_dir.to_string_lossy())?;
        validation::validate_file_name("servos_file", &self.keys.servos)?;
        validation::validate_file_name("presets_file", &self.keys.presets)?;
        Ok(())
    }
}
