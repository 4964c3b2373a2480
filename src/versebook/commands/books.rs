use crate::commands::{CmdMessage, CmdResult};
use crate::corpus::ScriptureRepository;
use crate::error::Result;
use crate::preferences::AppPreferences;

/// Books of the current version with localized names.
pub fn run(scripture: &ScriptureRepository, prefs: &AppPreferences) -> Result<CmdResult> {
    let books = scripture.list_books(&prefs.version_id, prefs.locale);
    let mut result = CmdResult::default().with_locale(prefs.locale);
    if books.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Version '{}' has no books",
            prefs.version_id
        )));
    }
    Ok(result.with_books(books))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Locale, Theme};

    #[test]
    fn lists_books_in_reader_language() {
        let repo = ScriptureRepository::with_bundled().unwrap();
        let mut prefs = AppPreferences::defaults(Theme::Light, "en_kjv");
        prefs.locale = Locale::Pt;
        let result = run(&repo, &prefs).unwrap();
        let names: Vec<_> = result.books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Gênesis", "Êxodo"]);
        assert_eq!(result.books[0].chapter_count, 2);
    }

    #[test]
    fn empty_repository_warns() {
        let repo = ScriptureRepository::new();
        let prefs = AppPreferences::defaults(Theme::Light, "");
        let result = run(&repo, &prefs).unwrap();
        assert!(result.books.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
