use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage key for the appearance preference.
pub const APPEARANCE_KEY: &str = "theme";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppearanceError {
    #[error("unknown appearance {raw:?}")]
    Unknown { raw: String },
}

/// Light or dark presentation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Appearance::Dark
    }

    /// Pick the effective appearance at startup.
    ///
    /// A stored preference always wins; otherwise the system hint decides,
    /// and without a hint the app starts light.
    #[must_use]
    pub fn resolve(stored: Option<Appearance>, system_prefers_dark: Option<bool>) -> Self {
        match (stored, system_prefers_dark) {
            (Some(stored), _) => stored,
            (None, Some(true)) => Appearance::Dark,
            (None, _) => Appearance::Light,
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Appearance {
    type Err = AppearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            other => Err(AppearanceError::Unknown {
                raw: other.to_string(),
            }),
        }
    }
}
