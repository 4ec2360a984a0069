use serde::Deserialize;
use std::env;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level process configuration sourced from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
    pub ranking_config_path: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("FREN_DATA_DIR").unwrap_or_else(|_| "follow_data".to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        let ranking_config_path =
            env::var("FREN_CONFIG").unwrap_or_else(|_| "config.json".to_string());
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig {
                data_dir: PathBuf::from(data_dir),
            },
            telemetry: TelemetryConfig { log_level },
            ranking_config_path: PathBuf::from(ranking_config_path),
        })
    }
}

/// Where weekly snapshots live on disk.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// API credentials. The core never inspects them; they are handed to whatever
/// client talks to the social network.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

/// Operator settings for the ranking run, read once from the JSON config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingConfig {
    pub credentials: Credentials,
    pub shoutout_count: usize,
    pub unfollow_count: usize,
    pub unfollow_datapoints_min: usize,
    pub unfollow_datapoints_max: usize,
}

/// On-disk shape of the config file. Every key is enumerated here so that a
/// typo fails the load instead of silently falling back to a default.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RankingConfigFile {
    api_key: String,
    api_secret: String,
    access_token: String,
    access_token_secret: String,
    shoutout_count: usize,
    unfollow_count: usize,
    unfollow_datapoints_min: usize,
    unfollow_datapoints_max: usize,
}

impl From<RankingConfigFile> for RankingConfig {
    fn from(file: RankingConfigFile) -> Self {
        Self {
            credentials: Credentials {
                api_key: file.api_key,
                api_secret: file.api_secret,
                access_token: file.access_token,
                access_token_secret: file.access_token_secret,
            },
            shoutout_count: file.shoutout_count,
            unfollow_count: file.unfollow_count,
            unfollow_datapoints_min: file.unfollow_datapoints_min,
            unfollow_datapoints_max: file.unfollow_datapoints_max,
        }
    }
}

impl RankingConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let file: RankingConfigFile =
            serde_json::from_reader(reader).map_err(ConfigError::Parse)?;
        let config = Self::from(file);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.unfollow_datapoints_max == 0 {
            return Err(ConfigError::ZeroScanWindow);
        }
        if self.unfollow_datapoints_min > self.unfollow_datapoints_max {
            return Err(ConfigError::DatapointBounds {
                min: self.unfollow_datapoints_min,
                max: self.unfollow_datapoints_max,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDataDir,
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    ZeroScanWindow,
    DatapointBounds {
        min: usize,
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDataDir => write!(f, "FREN_DATA_DIR must not be empty"),
            ConfigError::Read { path, .. } => {
                write!(f, "unable to read config file '{}'", path.display())
            }
            ConfigError::Parse(err) => write!(f, "invalid config file: {err}"),
            ConfigError::ZeroScanWindow => {
                write!(f, "unfollow-datapoints-max must be greater than zero")
            }
            ConfigError::DatapointBounds { min, max } => write!(
                f,
                "unfollow-datapoints-min ({min}) exceeds unfollow-datapoints-max ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::EmptyDataDir
            | ConfigError::ZeroScanWindow
            | ConfigError::DatapointBounds { .. } => None,
        }
    }
}
