//! Startup configuration: where the trip table lives and the initial theme.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::theme::Theme;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TAXI_DASHBOARD_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "taxi-dashboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DashboardConfig {
    /// Trip table loaded at startup. `None` starts with an empty dashboard.
    pub data_path: Option<PathBuf>,
    pub theme: Theme,
}

impl DashboardConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the config from the environment and command line.
    ///
    /// The file named by `$TAXI_DASHBOARD_CONFIG` must exist; the default
    /// file is optional. A first positional argument overrides `data-path`.
    pub fn resolve<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(path) = args.into_iter().nth(1) {
            config.data_path = Some(PathBuf::from(path));
        }

        log::info!(
            "Config: data path {:?}, theme {}",
            config.data_path,
            config.theme.label()
        );
        Ok(config)
    }
}
