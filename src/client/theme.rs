//! Light/dark theme preference

use std::fmt;

use super::session::SessionStorage;

/// Storage key for the theme preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than a stored `"dark"` means light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value of the `data-theme` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn load<S: SessionStorage>(storage: &S) -> Self {
        Self::from_stored(storage.get_item(THEME_KEY).as_deref())
    }

    /// Persist the preference, ignoring storage failures
    pub fn save<S: SessionStorage>(&self, storage: &mut S) {
        if let Err(e) = storage.set_item(THEME_KEY, self.as_str()) {
            tracing::debug!("Failed to save theme: {}", e);
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
