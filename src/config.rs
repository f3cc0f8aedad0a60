use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::files;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    // overrides the platform storage root for the export directory
    pub storage_root: Option<PathBuf>,
}

impl Config {
    pub fn app_dir(&self) -> PathBuf {
        match &self.storage_root {
            Some(root) => files::storage_app_dir(root),
            None => files::external_storage_app_dir(),
        }
    }
}

pub fn load(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}
