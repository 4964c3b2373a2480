use crate::commands::{ChapterPage, CmdMessage, CmdResult};
use crate::corpus::{ChapterFetcher, CommentaryRepository};
use crate::error::Result;
use crate::i18n::{t, Text};
use crate::navigation::NavigationController;
use crate::preferences::AppPreferences;

use super::helpers::resolve_book;

/// Moves to a chapter (or verse) and loads its text and commentary.
pub async fn run(
    fetcher: &ChapterFetcher,
    commentaries: &CommentaryRepository,
    nav: &mut NavigationController,
    prefs: &AppPreferences,
    book: &str,
    chapter: u32,
    verse: Option<u32>,
) -> Result<CmdResult> {
    let book_id = resolve_book(book);
    match verse {
        Some(v) => {
            nav.select_verse(&book_id, chapter, v);
        }
        None => nav.select_chapter(&book_id, chapter),
    }

    let mut result = CmdResult::default().with_locale(prefs.locale);
    let view = match nav.request_chapter() {
        Some(request) => {
            let view = fetcher.fetch(&request).await;
            view.filter(|_| nav.accept_chapter(&request))
        }
        None => None,
    };

    let Some(view) = view else {
        result.add_message(CmdMessage::error(format!(
            "{}: {} {}",
            t(Text::ChapterNotFound, prefs.locale),
            book.trim(),
            chapter
        )));
        return Ok(result);
    };

    if let Some(v) = verse {
        if view.verse(v).is_none() {
            result.add_message(CmdMessage::warning(format!(
                "{}: {} {}:{}",
                t(Text::VerseNotFound, prefs.locale),
                view.book_display_name,
                chapter,
                v
            )));
        }
    }

    let commentary =
        commentaries.resolve_commentary(prefs.commentary_id.as_deref(), &view.book_id, chapter);
    Ok(result.with_chapter(ChapterPage {
        view,
        commentary,
        highlight: verse,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::corpus::ScriptureRepository;
    use crate::model::{Locale, Theme};
    use std::sync::Arc;

    fn fixtures() -> (ChapterFetcher, CommentaryRepository, NavigationController) {
        let scripture = Arc::new(ScriptureRepository::with_bundled().unwrap());
        (
            ChapterFetcher::new(scripture),
            CommentaryRepository::with_bundled().unwrap(),
            NavigationController::new("en_kjv"),
        )
    }

    fn prefs(commentary: Option<&str>) -> AppPreferences {
        let mut prefs = AppPreferences::defaults(Theme::Light, "en_kjv");
        prefs.commentary_id = commentary.map(str::to_string);
        prefs
    }

    #[tokio::test]
    async fn reads_chapter_with_commentary() {
        let (fetcher, commentaries, mut nav) = fixtures();
        let prefs = prefs(Some("en_mh"));
        let result = run(&fetcher, &commentaries, &mut nav, &prefs, "Genesis", 1, None)
            .await
            .unwrap();
        let page = result.chapter.unwrap();
        assert_eq!(page.view.book_display_name, "Genesis");
        assert_eq!(page.view.verses.len(), 3);
        assert_eq!(page.commentary.len(), 2);
        assert_eq!(page.highlight, None);
        assert!(nav.nav_open());
    }

    #[tokio::test]
    async fn verse_selection_collapses_panel() {
        let (fetcher, commentaries, mut nav) = fixtures();
        let result = run(&fetcher, &commentaries, &mut nav, &prefs(None), "gen", 1, Some(2))
            .await
            .unwrap();
        let page = result.chapter.unwrap();
        assert_eq!(page.highlight, Some(2));
        assert!(page.commentary.is_empty());
        assert!(!nav.nav_open());
    }

    #[tokio::test]
    async fn missing_chapter_is_reported() {
        let (fetcher, commentaries, mut nav) = fixtures();
        let mut p = prefs(None);
        p.locale = Locale::Pt;
        let result = run(&fetcher, &commentaries, &mut nav, &p, "gen", 40, None)
            .await
            .unwrap();
        assert!(result.chapter.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.starts_with("Capítulo não encontrado"));
    }

    #[tokio::test]
    async fn missing_verse_still_shows_chapter() {
        let (fetcher, commentaries, mut nav) = fixtures();
        let result = run(&fetcher, &commentaries, &mut nav, &prefs(None), "gen", 1, Some(99))
            .await
            .unwrap();
        assert!(result.chapter.is_some());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }
}
