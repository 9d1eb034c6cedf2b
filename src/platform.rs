//! Read-only signals from the host: preferred language and light/dark scheme.
use std::env;

use log::trace;

/// Light or dark, as reported by the host or as resolved for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// What the host platform tells us about the user.
pub trait Platform {
    /// The host's light/dark setting, if it reports one.
    fn color_scheme(&self) -> Option<ColorScheme>;

    /// Two letter language code of the host's first locale (`en`, `fr`, ...).
    fn language_code(&self) -> Option<String>;
}

/// Reads the signals from environment variables.
///
/// The language comes from `LC_ALL`, `LC_MESSAGES` then `LANG`. The color
/// scheme comes from `MEETLOG_COLOR_SCHEME` (`dark` or `light`), falling back
/// to the background index in `COLORFGBG` that many terminals export.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvPlatform;

impl Platform for EnvPlatform {
    fn color_scheme(&self) -> Option<ColorScheme> {
        if let Ok(value) = env::var("MEETLOG_COLOR_SCHEME") {
            return parse_color_scheme(&value);
        }
        env::var("COLORFGBG")
            .ok()
            .and_then(|value| scheme_from_colorfgbg(&value))
    }

    fn language_code(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| language_from_locale(&value))
    }
}

/// Fixed answers, for tests and explicit overrides.
#[derive(Debug, Default, Clone)]
pub struct FixedPlatform {
    pub color_scheme: Option<ColorScheme>,
    pub language_code: Option<String>,
}

impl Platform for FixedPlatform {
    fn color_scheme(&self) -> Option<ColorScheme> {
        self.color_scheme
    }

    fn language_code(&self) -> Option<String> {
        self.language_code.clone()
    }
}

fn parse_color_scheme(value: &str) -> Option<ColorScheme> {
    match value.trim().to_lowercase().as_str() {
        "dark" => Some(ColorScheme::Dark),
        "light" => Some(ColorScheme::Light),
        _ => None,
    }
}

// "15;0" means white on black; backgrounds 0-6 and 8 are dark colors.
fn scheme_from_colorfgbg(value: &str) -> Option<ColorScheme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    trace!("COLORFGBG background index: {}", background);
    if background <= 6 || background == 8 {
        Some(ColorScheme::Dark)
    } else {
        Some(ColorScheme::Light)
    }
}

/// Extracts the language part of a POSIX locale (`en_US.UTF-8` -> `en`).
fn language_from_locale(locale: &str) -> Option<String> {
    let language = locale
        .split(['_', '.', '@', '-'])
        .next()?
        .trim()
        .to_lowercase();

    if language.is_empty() || language == "c" || language == "posix" {
        None
    } else {
        Some(language)
    }
}
