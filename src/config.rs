use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_ENGINES;
use crate::error::{NurseDataError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_ENV_VAR: &str = "NURSE_DATA_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub aggregate: AggregateConfig,
    pub enrich: EnrichConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "nurse-data.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Explicit CSV sources. When empty, sources are derived from `base_path` and `engines`.
    pub inputs: Vec<PathBuf>,
    /// Prefix that each engine name is appended to, e.g. `packages/engine-`.
    pub base_path: String,
    pub engines: Vec<String>,
    pub output_dir: PathBuf,
    pub profiles_file: String,
    pub report_file: String,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            base_path: "packages/engine-".to_string(),
            engines: DEFAULT_ENGINES.iter().map(|e| e.to_string()).collect(),
            output_dir: PathBuf::from("packages/gateway/src/data"),
            profiles_file: "nurses.json".to_string(),
            report_file: "nurses_data_quality_report.json".to_string(),
        }
    }
}

impl AggregateConfig {
    /// The CSV files to aggregate, in load order.
    pub fn sources(&self) -> Vec<PathBuf> {
        if !self.inputs.is_empty() {
            return self.inputs.clone();
        }
        self.engines
            .iter()
            .map(|engine| {
                PathBuf::from(format!("{}{}", self.base_path, engine))
                    .join("sample_data")
                    .join("nurses.csv")
            })
            .collect()
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.output_dir.join(&self.profiles_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub names_path: PathBuf,
    pub corpus_path: PathBuf,
    pub output_path: PathBuf,
    pub seed: u64,
    pub progress_interval: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            names_path: PathBuf::from("data/nurse-names.xlsx"),
            corpus_path: PathBuf::from("packages/gateway/src/data/nurses.json"),
            output_path: PathBuf::from("packages/gateway/src/data/nurses-enriched.json"),
            seed: 42,
            progress_interval: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub csv_path: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("nurses.csv"),
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit path (CLI flag or `NURSE_DATA_CONFIG`) must exist. Without one,
    /// `config.toml` in the working directory is used when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NurseDataError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.enrich.progress_interval == 0 {
            return Err(NurseDataError::Config(
                "enrich.progress_interval must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
