use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{Language, MeetlogError, Result, CONTACT_EMAIL, CONTACT_PHONE, CONTACT_SUBJECT};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the key-value slots (notes, theme, language)
    pub data_dir: PathBuf,

    /// Address contact messages are sent to
    pub contact_email: String,

    /// Phone number displayed with the contact details
    pub contact_phone: String,

    /// Subject line of contact emails
    pub email_subject: String,

    /// Forces a language instead of the stored preference
    pub language: Option<Language>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            contact_email: CONTACT_EMAIL.to_string(),
            contact_phone: CONTACT_PHONE.to_string(),
            email_subject: CONTACT_SUBJECT.to_string(),
            language: None,
        }
    }
}

impl Config {
    /// Loads the configuration file at `path`, or the default location when
    /// `path` is `None`. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => {
                    debug!("No configuration directory on this platform, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| MeetlogError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "ute-sei", "meetlog")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".meetlog"))
}
