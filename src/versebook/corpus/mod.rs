//! # Corpora: Scripture and Commentary
//!
//! Read-only text collections. A **version** is one translation of the
//! scripture (books → chapters → verses); a **commentary** has the same shape
//! with annotation text per verse and no book names.
//!
//! Nothing here is ever mutated after loading. Lookups that miss (unknown
//! book, chapter out of range) return `None` or an empty map; they are
//! ordinary outcomes, not errors. [`CorpusError`] is reserved for documents
//! that cannot be read or understood at all.
//!
//! ## Modules
//!
//! - [`structure`]: the canonical 66-book table with localized names
//! - [`normalize`]: maps the accepted raw JSON shapes into [`Version`]
//! - [`scripture`]: the version registry and chapter resolution
//! - [`commentary`]: the commentary registry
//! - [`bundled`]: the corpora compiled into the binary

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::model::Locale;

pub mod bundled;
pub mod commentary;
pub mod normalize;
pub mod scripture;
pub mod structure;

pub use commentary::CommentaryRepository;
pub use scripture::{ChapterFetcher, ScriptureRepository};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter: u32,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.chapter == number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub name: String,
    pub language: Locale,
    pub books: Vec<Book>,
}

impl Version {
    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryChapter {
    pub chapter: u32,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryBook {
    pub id: String,
    pub chapters: Vec<CommentaryChapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commentary {
    pub id: String,
    pub name: String,
    pub language: Locale,
    pub books: Vec<CommentaryBook>,
}

/// A resolved chapter, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterView {
    pub version_id: String,
    pub book_id: String,
    pub book_display_name: String,
    pub chapter: u32,
    pub verses: Vec<Verse>,
}

impl ChapterView {
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.verse == number)
    }
}

/// One row of the book list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub chapter_count: usize,
}

/// Registry entry shown by `versions` / `commentaries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusInfo {
    pub id: String,
    pub name: String,
    pub language: Option<Locale>,
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unrecognized corpus layout in {0}")]
    Shape(String),
}
