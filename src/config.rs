use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    pub no_color: bool,
    /// Email to sign in with at startup; the login prompt is shown otherwise.
    pub user: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            no_color: false,
            user: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub no_color: bool,
    pub user: Option<String>,
}

impl ClientConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.apply(overrides))
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if overrides.no_color {
            self.no_color = true;
        }
        if overrides.user.is_some() {
            self.user = overrides.user;
        }
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn color(&self) -> bool {
        !self.no_color
    }
}
