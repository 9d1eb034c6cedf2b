//! Theme and language preferences.
//!
//! Both values are loaded once at startup and written back on every change.
//! The effective theme is derived on read and never stored.
use std::{fmt, str::FromStr, sync::Arc};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    ColorScheme, KeyValueStore, MeetlogError, Platform, Result, LANGUAGE_KEY, THEME_KEY,
};

/// The stored theme setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the host's light/dark setting
    #[default]
    System,
}

impl ThemeMode {
    /// The next mode in the cycle light -> dark -> system -> light.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Resolves the mode against the host signal. `System` with no signal is light.
    pub fn resolve(self, system: Option<ColorScheme>) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::System => system.unwrap_or(ColorScheme::Light),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = MeetlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(MeetlogError::InvalidPreference {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two supported languages. French is the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Fr => Language::En,
            Language::En => Language::Fr,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    /// First-run default: English only when the host explicitly says `en`.
    pub fn from_host(code: Option<&str>) -> Self {
        match code {
            Some("en") => Language::En,
            _ => Language::Fr,
        }
    }
}

impl FromStr for Language {
    type Err = MeetlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => Err(MeetlogError::InvalidPreference {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Owns the theme mode and language and mirrors them to their slots.
pub struct PreferenceStore {
    kv: Arc<dyn KeyValueStore>,
    theme_mode: ThemeMode,
    language: Language,
}

impl PreferenceStore {
    /// Loads both preferences, falling back to `System` and the host language.
    ///
    /// Read failures and unknown stored values are logged and replaced by the
    /// defaults; loading never fails.
    pub async fn load(kv: Arc<dyn KeyValueStore>, platform: &dyn Platform) -> Self {
        let theme_mode = match kv.get(THEME_KEY).await {
            Ok(Some(stored)) => stored.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme mode: {}", e);
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                error!("Failed to load theme mode: {}", e);
                ThemeMode::default()
            }
        };

        let host_language = || Language::from_host(platform.language_code().as_deref());
        let language = match kv.get(LANGUAGE_KEY).await {
            Ok(Some(stored)) => stored.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored language: {}", e);
                host_language()
            }),
            Ok(None) => host_language(),
            Err(e) => {
                error!("Failed to load language: {}", e);
                Language::Fr
            }
        };

        info!(
            "Loaded preferences: theme={}, language={}",
            theme_mode, language
        );

        Self {
            kv,
            theme_mode,
            language,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The theme to render with, resolving `System` against the host.
    pub fn effective_theme(&self, platform: &dyn Platform) -> ColorScheme {
        self.theme_mode.resolve(platform.color_scheme())
    }

    /// Advances the theme mode one step and persists it.
    ///
    /// The new mode is kept in memory even if the write fails.
    pub async fn toggle_theme(&mut self) -> Result<ThemeMode> {
        self.theme_mode = self.theme_mode.next();
        debug!("Theme mode is now {}", self.theme_mode);
        self.persist(THEME_KEY, self.theme_mode.as_str()).await?;
        Ok(self.theme_mode)
    }

    /// Switches between the two languages and persists the choice.
    pub async fn toggle_language(&mut self) -> Result<Language> {
        self.set_language(self.language.toggled()).await?;
        Ok(self.language)
    }

    pub async fn set_language(&mut self, language: Language) -> Result<()> {
        self.language = language;
        debug!("Language is now {}", self.language);
        self.persist(LANGUAGE_KEY, self.language.code()).await
    }

    async fn persist(&self, key: &str, value: &str) -> Result<()> {
        self.kv.set(key, value).await.map_err(|e| {
            error!("Failed to save preference '{}': {}", key, e);
            MeetlogError::Persistence {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
    }
}
