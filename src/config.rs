use std::fs;

use camino::Utf8PathBuf;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::adapter::{DEFAULT_FANOUT, DEFAULT_LIMIT};
use crate::api::DEFAULT_BASE_URL;
use crate::error::CatalogError;

pub const CONFIG_FILE_NAME: &str = "pokedex.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_retries: Option<usize>,
    #[serde(default)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub base_url: String,
    pub limit: u32,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub concurrency: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            schema_version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_secs: 30,
            max_retries: 0,
            concurrency: DEFAULT_FANOUT,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, CatalogError> {
        let config_path = match path {
            Some(path) => Utf8PathBuf::from(path),
            None => match Self::discover() {
                Some(found) => found,
                None => return Ok(ResolvedConfig::default()),
            },
        };

        let content = fs::read_to_string(config_path.as_std_path())
            .map_err(|_| CatalogError::ConfigRead(config_path.clone().into_std_path_buf()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| CatalogError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, CatalogError> {
        let defaults = ResolvedConfig::default();

        let limit = config.limit.unwrap_or(defaults.limit);
        if limit == 0 {
            return Err(CatalogError::ConfigParse(
                "limit must be a positive integer".to_string(),
            ));
        }

        let base_url = match config.base_url {
            Some(url) if url.trim().is_empty() => {
                return Err(CatalogError::ConfigParse(
                    "base_url must not be empty".to_string(),
                ));
            }
            Some(url) => url.trim().to_string(),
            None => defaults.base_url,
        };

        let concurrency = config.concurrency.unwrap_or(defaults.concurrency);
        if concurrency == 0 {
            return Err(CatalogError::ConfigParse(
                "concurrency must be a positive integer".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            schema_version: config.schema_version.unwrap_or(defaults.schema_version),
            base_url,
            limit,
            timeout_secs: config.timeout_secs.unwrap_or(defaults.timeout_secs),
            max_retries: config.max_retries.unwrap_or(defaults.max_retries),
            concurrency,
        })
    }

    pub fn search_paths() -> Vec<Utf8PathBuf> {
        let mut paths = vec![Utf8PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = BaseDirs::new().and_then(|dirs| {
            Utf8PathBuf::from_path_buf(dirs.config_dir().join("pokedex").join(CONFIG_FILE_NAME))
                .ok()
        }) {
            paths.push(dir);
        }
        paths
    }

    fn discover() -> Option<Utf8PathBuf> {
        Self::search_paths()
            .into_iter()
            .find(|path| path.as_std_path().is_file())
    }
}
