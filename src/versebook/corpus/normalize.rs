//! # Corpus Normalization
//!
//! Scripture documents come in several layouts. They are all mapped into the
//! canonical [`Version`] here, once, at load time, so the rest of the crate
//! never has to care which layout a file used.
//!
//! ## Accepted Layouts
//!
//! 1. **Canonical** (what versebook itself writes):
//!    `{ "id", "name", "language", "books": [{ "id", "name", "chapters":
//!    [{ "chapter": 1, "verses": [{ "verse": 1, "text": "…" }] }] }] }`
//! 2. **Chapter arrays**: `[{ "abbrev": "gn", "name": "Genesis", "chapters":
//!    [["verse 1", "verse 2"], ["…"]] }]`. Chapter and verse numbers are the
//!    1-based array positions.
//! 3. **Flat rows**: `[{ "book": "gen", "chapter": 1, "verse": 1, "text": "…" }]`,
//!    optionally wrapped as `{ "verses": [...] }`.
//!
//! After mapping, chapters and verses are sorted by number. Missing version
//! metadata is filled from the caller's fallback id; missing book names come
//! from [`super::structure`].

use serde::Deserialize;
use std::collections::HashMap;

use super::structure;
use super::{Book, Chapter, CorpusError, Verse, Version};
use crate::model::Locale;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Canonical(RawCanonical),
    WrappedRows { verses: Vec<RawRow> },
    ChapterArrays(Vec<RawArrayBook>),
    FlatRows(Vec<RawRow>),
}

#[derive(Deserialize)]
struct RawCanonical {
    id: Option<String>,
    name: Option<String>,
    language: Option<String>,
    books: Vec<RawBook>,
}

#[derive(Deserialize)]
struct RawBook {
    id: String,
    name: Option<String>,
    chapters: Vec<RawChapter>,
}

#[derive(Deserialize)]
struct RawChapter {
    chapter: u32,
    verses: Vec<Verse>,
}

#[derive(Deserialize)]
struct RawArrayBook {
    #[serde(alias = "abbrev")]
    id: String,
    name: Option<String>,
    chapters: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct RawRow {
    #[serde(alias = "book_id")]
    book: String,
    chapter: u32,
    verse: u32,
    text: String,
}

/// Metadata used when the document does not carry its own.
#[derive(Debug, Clone)]
pub struct Fallback<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

pub fn normalize_version(
    raw: &str,
    origin: &str,
    fallback: Fallback<'_>,
) -> Result<Version, CorpusError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|source| CorpusError::Json {
        origin: origin.to_string(),
        source,
    })?;
    let document = RawDocument::deserialize(value)
        .map_err(|_| CorpusError::Shape(origin.to_string()))?;

    let version = match document {
        RawDocument::Canonical(doc) => {
            let id = doc.id.unwrap_or_else(|| fallback.id.to_string());
            let language = doc
                .language
                .and_then(|l| l.parse().ok())
                .unwrap_or_else(|| guess_language(&id));
            let books = doc
                .books
                .into_iter()
                .map(|b| Book {
                    name: book_display_name(&b.id, b.name, language),
                    id: b.id,
                    chapters: b
                        .chapters
                        .into_iter()
                        .map(|c| Chapter {
                            chapter: c.chapter,
                            verses: c.verses,
                        })
                        .collect(),
                })
                .collect();
            Version {
                name: doc.name.unwrap_or_else(|| fallback.name.to_string()),
                id,
                language,
                books,
            }
        }
        RawDocument::ChapterArrays(books) => {
            let language = guess_language(fallback.id);
            let books = books
                .into_iter()
                .map(|b| Book {
                    name: book_display_name(&b.id, b.name, language),
                    chapters: b
                        .chapters
                        .into_iter()
                        .enumerate()
                        .map(|(ci, texts)| Chapter {
                            chapter: ci as u32 + 1,
                            verses: texts
                                .into_iter()
                                .enumerate()
                                .map(|(vi, text)| Verse {
                                    verse: vi as u32 + 1,
                                    text,
                                })
                                .collect(),
                        })
                        .collect(),
                    id: b.id,
                })
                .collect();
            fallback_version(fallback, language, books)
        }
        RawDocument::FlatRows(rows) | RawDocument::WrappedRows { verses: rows } => {
            let language = guess_language(fallback.id);
            fallback_version(fallback, language, group_rows(rows, language))
        }
    };

    Ok(sorted(version))
}

fn fallback_version(fallback: Fallback<'_>, language: Locale, books: Vec<Book>) -> Version {
    Version {
        id: fallback.id.to_string(),
        name: fallback.name.to_string(),
        language,
        books,
    }
}

fn group_rows(rows: Vec<RawRow>, language: Locale) -> Vec<Book> {
    let mut books: Vec<Book> = Vec::new();
    let mut book_pos: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let bi = *book_pos.entry(row.book.clone()).or_insert_with(|| {
            books.push(Book {
                id: row.book.clone(),
                name: structure::book_name(&row.book, language),
                chapters: Vec::new(),
            });
            books.len() - 1
        });
        let book = &mut books[bi];
        let verse = Verse {
            verse: row.verse,
            text: row.text,
        };
        match book.chapters.iter_mut().find(|c| c.chapter == row.chapter) {
            Some(chapter) => chapter.verses.push(verse),
            None => book.chapters.push(Chapter {
                chapter: row.chapter,
                verses: vec![verse],
            }),
        }
    }
    books
}

fn sorted(mut version: Version) -> Version {
    for book in &mut version.books {
        book.chapters.sort_by_key(|c| c.chapter);
        for chapter in &mut book.chapters {
            chapter.verses.sort_by_key(|v| v.verse);
        }
    }
    version
}

fn book_display_name(id: &str, raw: Option<String>, language: Locale) -> String {
    raw.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| structure::book_name(id, language))
}

/// Ids follow the `<lang>_<abbrev>` convention (`pt_aa`, `en_kjv`).
fn guess_language(id: &str) -> Locale {
    id.split(['_', '-'])
        .next()
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or_default()
}
