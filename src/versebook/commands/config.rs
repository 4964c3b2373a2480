use crate::commands::{CmdMessage, CmdResult};
use crate::corpus::{CommentaryRepository, ScriptureRepository};
use crate::error::Result;
use crate::model::{Locale, Theme};
use crate::navigation::NavigationController;
use crate::preferences::{PrefKey, PreferenceStore};
use crate::store::StorageBackend;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Registries a new value is validated against.
pub struct Registries<'a> {
    pub scripture: &'a ScriptureRepository,
    pub commentaries: &'a CommentaryRepository,
}

pub fn run<B: StorageBackend>(
    prefs: &mut PreferenceStore<B>,
    nav: &mut NavigationController,
    registries: Registries<'_>,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_locale(prefs.get().locale);
    match action {
        ConfigAction::ShowAll => {
            let all = PrefKey::ALL
                .iter()
                .map(|key| (*key, prefs.value_of(*key)))
                .collect();
            Ok(result.with_preferences(all))
        }
        ConfigAction::ShowKey(key) => {
            match key.parse::<PrefKey>() {
                Ok(k) => result.add_message(CmdMessage::info(prefs.value_of(k))),
                Err(e) => result.add_message(CmdMessage::error(e)),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let key = match key.parse::<PrefKey>() {
                Ok(k) => k,
                Err(e) => {
                    result.add_message(CmdMessage::error(e));
                    return Ok(result);
                }
            };
            let written = match apply(prefs, nav, &registries, key, value.trim()) {
                Ok(written) => written,
                Err(e) => {
                    result.add_message(CmdMessage::error(e));
                    return Ok(result);
                }
            };
            result.locale = prefs.get().locale;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                prefs.value_of(key)
            )));
            if let Err(e) = written {
                tracing::warn!(%key, error = %e, "preference not persisted");
                result.add_message(CmdMessage::warning(format!(
                    "Setting kept for this session only, saving failed: {}",
                    e
                )));
            }
            Ok(result)
        }
    }
}

/// Validates and applies one value. The outer error is a rejected value;
/// the inner result is the outcome of writing it.
fn apply<B: StorageBackend>(
    prefs: &mut PreferenceStore<B>,
    nav: &mut NavigationController,
    registries: &Registries<'_>,
    key: PrefKey,
    value: &str,
) -> std::result::Result<Result<()>, String> {
    match key {
        PrefKey::Theme if value == "toggle" => Ok(prefs.toggle_theme().map(|_| ())),
        PrefKey::Theme => {
            let theme = value.parse::<Theme>()?;
            Ok(prefs.set_theme(theme))
        }
        PrefKey::Language => {
            let locale = value.parse::<Locale>()?;
            Ok(prefs.set_locale(locale))
        }
        PrefKey::Version => {
            if !registries.scripture.contains(value) {
                return Err(format!("Unknown version: {}", value));
            }
            nav.set_version(value);
            Ok(prefs.set_version(value))
        }
        PrefKey::Commentary => {
            if matches!(value, "" | "none" | "off") {
                return Ok(prefs.set_commentary(None));
            }
            if !registries.commentaries.contains(value) {
                return Err(format!("Unknown commentary: {}", value));
            }
            Ok(prefs.set_commentary(Some(value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    struct Fixture {
        prefs: PreferenceStore<MemBackend>,
        nav: NavigationController,
        scripture: ScriptureRepository,
        commentaries: CommentaryRepository,
    }

    impl Fixture {
        fn new(backend: MemBackend) -> Self {
            let scripture = ScriptureRepository::with_bundled().unwrap();
            let prefs = PreferenceStore::load(backend, Theme::Light, &scripture.version_ids());
            Self {
                nav: NavigationController::new(prefs.get().version_id.clone()),
                prefs,
                scripture,
                commentaries: CommentaryRepository::with_bundled().unwrap(),
            }
        }

        fn run(&mut self, action: ConfigAction) -> CmdResult {
            let registries = Registries {
                scripture: &self.scripture,
                commentaries: &self.commentaries,
            };
            run(&mut self.prefs, &mut self.nav, registries, action).unwrap()
        }
    }

    fn set(key: &str, value: &str) -> ConfigAction {
        ConfigAction::Set(key.to_string(), value.to_string())
    }

    #[test]
    fn shows_all_keys() {
        let mut fx = Fixture::new(MemBackend::new());
        let result = fx.run(ConfigAction::ShowAll);
        let keys: Vec<_> = result.preferences.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, PrefKey::ALL.to_vec());
        assert_eq!(result.preferences[2].1, "pt_aa");
        assert_eq!(result.preferences[3].1, "none");
    }

    #[test]
    fn sets_and_validates_values() {
        let mut fx = Fixture::new(MemBackend::new());

        let ok = fx.run(set("version", "en_kjv"));
        assert_eq!(ok.messages[0].content, "version set to en_kjv");
        assert_eq!(fx.nav.version_id(), "en_kjv");

        let bad = fx.run(set("version", "xx"));
        assert_eq!(bad.messages[0].level, MessageLevel::Error);
        assert_eq!(fx.prefs.get().version_id, "en_kjv");

        fx.run(set("commentary", "en_mh"));
        assert_eq!(fx.prefs.get().commentary_id.as_deref(), Some("en_mh"));
        fx.run(set("commentary", "none"));
        assert_eq!(fx.prefs.get().commentary_id, None);

        let lang = fx.run(set("lang", "pt"));
        assert_eq!(lang.locale, Locale::Pt);

        fx.run(set("theme", "toggle"));
        assert_eq!(fx.prefs.get().theme, Theme::Dark);
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let mut fx = Fixture::new(MemBackend::new());
        let result = fx.run(ConfigAction::ShowKey("font".into()));
        assert_eq!(result.messages[0].content, "Unknown config key: font");
    }

    #[test]
    fn write_failure_keeps_session_value() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut fx = Fixture::new(backend);
        let result = fx.run(set("theme", "dark"));
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        assert_eq!(fx.prefs.get().theme, Theme::Dark);
    }

    #[test]
    fn toggle_flips_the_stored_theme() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut fx = Fixture::new(backend);

        let result = fx.run(set("theme", "toggle"));
        assert_eq!(result.messages[0].content, "theme set to dark");
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        fx.run(set("theme", "toggle"));
        assert_eq!(fx.prefs.get().theme, Theme::Light);
    }
}
