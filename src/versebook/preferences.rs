//! # Application Preferences
//!
//! Theme, language, scripture version and commentary selection live in one
//! explicit [`AppPreferences`] value. It is loaded once at startup by
//! [`PreferenceStore::load`] and each setter writes its own key back, so
//! there is no ambient global state.
//!
//! ## Defaults
//!
//! - `theme`: the OS preference (via `dark-light`), light if unknown
//! - `language`: `en`
//! - `bible_version`: the first registered version; a saved id that is no
//!   longer registered is ignored
//! - `bible_commentary`: none
//!
//! ## Failure Handling
//!
//! Unreadable or malformed values fall back to the default for that key
//! alone. Setters update the in-memory value before writing, so a failed
//! write still changes the preference for the current session.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VersebookError};
use crate::model::{Locale, Theme};
use crate::store::StorageBackend;

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";
pub const VERSION_KEY: &str = "bible_version";
pub const COMMENTARY_KEY: &str = "bible_commentary";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPreferences {
    pub theme: Theme,
    pub locale: Locale,
    pub version_id: String,
    pub commentary_id: Option<String>,
}

impl AppPreferences {
    pub fn defaults(os_theme: Theme, default_version: &str) -> Self {
        Self {
            theme: os_theme,
            locale: Locale::default(),
            version_id: default_version.to_string(),
            commentary_id: None,
        }
    }
}

/// The OS color-scheme preference.
pub fn os_theme() -> Theme {
    match dark_light::detect() {
        dark_light::Mode::Dark => Theme::Dark,
        _ => Theme::Light,
    }
}

/// User-facing preference names, as accepted by `versebook config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    Theme,
    Language,
    Version,
    Commentary,
}

impl PrefKey {
    pub const ALL: [PrefKey; 4] = [
        PrefKey::Theme,
        PrefKey::Language,
        PrefKey::Version,
        PrefKey::Commentary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::Theme => "theme",
            PrefKey::Language => "language",
            PrefKey::Version => "version",
            PrefKey::Commentary => "commentary",
        }
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "theme" => Ok(PrefKey::Theme),
            "language" | "lang" | "locale" => Ok(PrefKey::Language),
            "version" | "bible" => Ok(PrefKey::Version),
            "commentary" => Ok(PrefKey::Commentary),
            other => Err(format!("Unknown config key: {}", other)),
        }
    }
}

pub struct PreferenceStore<B: StorageBackend> {
    backend: B,
    prefs: AppPreferences,
}

impl<B: StorageBackend> PreferenceStore<B> {
    /// Loads preferences. `versions` are the registered version ids in
    /// registration order; the first one is the default.
    pub fn load(backend: B, os_theme: Theme, versions: &[String]) -> Self {
        let default_version = versions.first().map(String::as_str).unwrap_or_default();
        let mut prefs = AppPreferences::defaults(os_theme, default_version);

        if let Some(theme) = read_key::<Theme, _>(&backend, THEME_KEY) {
            prefs.theme = theme;
        }
        if let Some(locale) = read_key::<Locale, _>(&backend, LANGUAGE_KEY) {
            prefs.locale = locale;
        }
        if let Some(version) = read_key::<String, _>(&backend, VERSION_KEY) {
            if versions.contains(&version) {
                prefs.version_id = version;
            } else {
                tracing::debug!(%version, "saved version is not registered, using default");
            }
        }
        prefs.commentary_id = read_key::<String, _>(&backend, COMMENTARY_KEY);

        Self { backend, prefs }
    }

    pub fn get(&self) -> &AppPreferences {
        &self.prefs
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.prefs.theme = theme;
        write_key(&self.backend, THEME_KEY, &theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.prefs.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.prefs.locale = locale;
        write_key(&self.backend, LANGUAGE_KEY, &locale)
    }

    /// Callers validate the id against the registry first.
    pub fn set_version(&mut self, version_id: &str) -> Result<()> {
        self.prefs.version_id = version_id.to_string();
        write_key(&self.backend, VERSION_KEY, &version_id)
    }

    /// `None` clears the selection and removes the key.
    pub fn set_commentary(&mut self, commentary_id: Option<&str>) -> Result<()> {
        self.prefs.commentary_id = commentary_id.map(str::to_string);
        match commentary_id {
            Some(id) => write_key(&self.backend, COMMENTARY_KEY, &id),
            None => self.backend.remove(COMMENTARY_KEY),
        }
    }

    /// Display value of a preference.
    pub fn value_of(&self, key: PrefKey) -> String {
        match key {
            PrefKey::Theme => self.prefs.theme.to_string(),
            PrefKey::Language => self.prefs.locale.to_string(),
            PrefKey::Version => self.prefs.version_id.clone(),
            PrefKey::Commentary => self
                .prefs
                .commentary_id
                .clone()
                .unwrap_or_else(|| "none".to_string()),
        }
    }
}

fn read_key<T: DeserializeOwned, B: StorageBackend>(backend: &B, key: &str) -> Option<T> {
    let raw = match backend.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "preference unreadable, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "preference malformed, using default");
            None
        }
    }
}

fn write_key<T: Serialize + ?Sized, B: StorageBackend>(
    backend: &B,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value).map_err(VersebookError::Serialization)?;
    backend.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::rc::Rc;

    fn versions() -> Vec<String> {
        vec!["pt_aa".to_string(), "en_kjv".to_string()]
    }

    #[test]
    fn defaults_when_nothing_saved() {
        let store = PreferenceStore::load(MemBackend::new(), Theme::Dark, &versions());
        let prefs = store.get();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.locale, Locale::En);
        assert_eq!(prefs.version_id, "pt_aa");
        assert_eq!(prefs.commentary_id, None);
    }

    #[test]
    fn saved_values_survive_reload() {
        let backend = Rc::new(MemBackend::new());
        let mut store = PreferenceStore::load(backend.clone(), Theme::Light, &versions());
        store.set_theme(Theme::Dark).unwrap();
        store.set_locale(Locale::Pt).unwrap();
        store.set_version("en_kjv").unwrap();
        store.set_commentary(Some("en_mh")).unwrap();

        let reloaded = PreferenceStore::load(backend, Theme::Light, &versions());
        assert_eq!(reloaded.get(), store.get());
    }

    #[test]
    fn clearing_commentary_removes_key() {
        let backend = Rc::new(MemBackend::new());
        let mut store = PreferenceStore::load(backend.clone(), Theme::Light, &versions());
        store.set_commentary(Some("en_mh")).unwrap();
        store.set_commentary(None).unwrap();
        assert_eq!(backend.get(COMMENTARY_KEY).unwrap(), None);
        assert_eq!(store.value_of(PrefKey::Commentary), "none");
    }

    #[test]
    fn unknown_saved_version_falls_back_to_first() {
        let backend = MemBackend::new();
        backend.set(VERSION_KEY, "\"xx_gone\"").unwrap();
        let store = PreferenceStore::load(backend, Theme::Light, &versions());
        assert_eq!(store.get().version_id, "pt_aa");
    }

    #[test]
    fn malformed_value_only_resets_that_key() {
        let backend = MemBackend::new();
        backend.set(THEME_KEY, "\"purple\"").unwrap();
        backend.set(LANGUAGE_KEY, "\"pt\"").unwrap();
        let store = PreferenceStore::load(backend, Theme::Light, &versions());
        assert_eq!(store.get().theme, Theme::Light);
        assert_eq!(store.get().locale, Locale::Pt);
    }

    #[test]
    fn failed_write_still_applies_for_session() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = PreferenceStore::load(backend, Theme::Light, &versions());
        assert!(store.toggle_theme().is_err());
        assert_eq!(store.get().theme, Theme::Dark);
    }

    #[test]
    fn pref_keys_parse() {
        assert_eq!("lang".parse::<PrefKey>().unwrap(), PrefKey::Language);
        assert!("font".parse::<PrefKey>().is_err());
    }
}
