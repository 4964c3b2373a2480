use std::time::Duration;

use crate::commands::{CmdMessage, CmdResult, Insight};
use crate::corpus::ChapterFetcher;
use crate::error::Result;
use crate::i18n::{t, Text};
use crate::insight::{fetch_with_timeout, InsightProvider, InsightRequest};
use crate::preferences::AppPreferences;

use super::helpers::resolve_book;

/// Asks the provider about one verse of the current version. Provider
/// failures become a localized error message, not an `Err`.
pub async fn run<P: InsightProvider>(
    provider: &P,
    fetcher: &ChapterFetcher,
    prefs: &AppPreferences,
    book: &str,
    chapter: u32,
    verse: u32,
    timeout: Duration,
) -> Result<CmdResult> {
    let locale = prefs.locale;
    let mut result = CmdResult::default().with_locale(locale);

    let book_id = resolve_book(book);
    let found = fetcher
        .resolve(&prefs.version_id, &book_id, chapter)
        .await
        .and_then(|view| {
            let text = view.verse(verse)?.text.clone();
            Some((view.book_display_name, text))
        });
    let Some((book_display_name, verse_text)) = found else {
        result.add_message(CmdMessage::error(format!(
            "{}: {} {}:{}",
            t(Text::VerseNotFound, locale),
            book.trim(),
            chapter,
            verse
        )));
        return Ok(result);
    };

    let request = InsightRequest {
        verse_text,
        book_display_name,
        chapter,
        verse,
        locale,
    };
    match fetch_with_timeout(provider, &request, timeout).await {
        Ok(markdown) => Ok(result.with_insight(Insight {
            heading: format!(
                "{}: {} {}:{}",
                t(Text::VerseInsight, locale),
                request.book_display_name,
                chapter,
                verse
            ),
            verse_text: request.verse_text,
            markdown,
        })),
        Err(e) => {
            result.add_message(CmdMessage::error(e.user_message(locale)));
            Ok(result)
        }
    }
}
