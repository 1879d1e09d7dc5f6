use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Args;
use crate::error::{Error, Result};

pub const DEFAULT_MIRRORLIST: &str = "/etc/pacman.d/mirrorlist";
pub const DEFAULT_STATUS_URL: &str = "https://archlinux.org/mirrors/status/json/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mirrorlist: PathBuf,
    pub status_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirrorlist: PathBuf::from(DEFAULT_MIRRORLIST),
            status_url: DEFAULT_STATUS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_file = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read config {}: {e}", path.display()))
        })?;
        let config = toml::from_str::<Config>(&config_file).map_err(|e| {
            Error::Configuration(format!("invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Command-line values win over whatever the file (or the defaults) said.
    pub fn apply_overrides(mut self, args: &Args) -> Result<Self> {
        if let Some(input) = &args.input {
            self.mirrorlist = input.clone();
        }
        if let Some(url) = &args.url {
            self.status_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.status_url.trim().is_empty() {
            return Err(Error::Configuration("status_url is empty".to_string()));
        }
        Ok(())
    }
}
