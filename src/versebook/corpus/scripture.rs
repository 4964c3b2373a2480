//! # Scripture Repository
//!
//! The registry of scripture versions, in registration order. The first
//! registered version is the default and also the fallback for unknown ids,
//! so a stale `bible_version` preference still renders something.
//!
//! Versions come from two kinds of source:
//!
//! - **Embedded**: already parsed (the bundled corpora).
//! - **Document**: a JSON file on disk, parsed on first use and cached. A
//!   document that fails to load is logged once and then behaves like an
//!   empty version (every lookup misses).
//!
//! Lookups never fail: a miss is `None`, `0` or an empty list.

use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::normalize::{normalize_version, Fallback};
use super::structure;
use super::{bundled, BookSummary, ChapterView, CorpusError, CorpusInfo, Version};
use crate::model::Locale;
use crate::navigation::ChapterRequest;

enum Source {
    Embedded(Version),
    Document {
        path: PathBuf,
        cell: OnceCell<Option<Version>>,
    },
}

struct Entry {
    id: String,
    source: Source,
}

impl Entry {
    fn load(&self) -> Option<&Version> {
        match &self.source {
            Source::Embedded(version) => Some(version),
            Source::Document { path, cell } => cell
                .get_or_init(|| match load_document(path, &self.id) {
                    Ok(version) => {
                        tracing::debug!(
                            id = %self.id,
                            path = %path.display(),
                            "loaded scripture document"
                        );
                        Some(version)
                    }
                    Err(e) => {
                        tracing::warn!(id = %self.id, error = %e, "scripture document unusable");
                        None
                    }
                })
                .as_ref(),
        }
    }

    fn info(&self) -> CorpusInfo {
        match &self.source {
            Source::Embedded(version) => CorpusInfo {
                id: version.id.clone(),
                name: version.name.clone(),
                language: Some(version.language),
            },
            Source::Document { cell, .. } => match cell.get() {
                Some(Some(version)) => CorpusInfo {
                    id: self.id.clone(),
                    name: version.name.clone(),
                    language: Some(version.language),
                },
                _ => CorpusInfo {
                    id: self.id.clone(),
                    name: self.id.clone(),
                    language: None,
                },
            },
        }
    }
}

fn load_document(path: &Path, id: &str) -> Result<Version, CorpusError> {
    let raw = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut version = normalize_version(
        &raw,
        &path.display().to_string(),
        Fallback { id, name: id },
    )?;
    // The registry id is the file stem, whatever the document says.
    version.id = id.to_string();
    Ok(version)
}

#[derive(Default)]
pub struct ScriptureRepository {
    entries: Vec<Entry>,
}

impl ScriptureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding the versions compiled into the binary.
    pub fn with_bundled() -> Result<Self, CorpusError> {
        let mut repo = Self::new();
        for version in bundled::versions()? {
            repo.register(version);
        }
        Ok(repo)
    }

    /// Registers a parsed version. Returns false if the id is taken.
    pub fn register(&mut self, version: Version) -> bool {
        if self.contains(&version.id) {
            tracing::warn!(id = %version.id, "duplicate version id ignored");
            return false;
        }
        self.entries.push(Entry {
            id: version.id.clone(),
            source: Source::Embedded(version),
        });
        true
    }

    /// Registers a JSON document; its id is the file stem. The file is not
    /// read until the version is first used.
    pub fn register_document(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            return false;
        };
        if self.contains(&id) {
            tracing::warn!(%id, path = %path.display(), "duplicate version id ignored");
            return false;
        }
        self.entries.push(Entry {
            id,
            source: Source::Document {
                path,
                cell: OnceCell::new(),
            },
        });
        true
    }

    /// Registers every `*.json` file in `dir`, sorted by name. A missing
    /// directory registers nothing.
    pub fn register_dir(&mut self, dir: &Path) -> Result<usize, CorpusError> {
        if !dir.is_dir() {
            return Ok(0);
        }
        let read_err = |source| CorpusError::Read {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut added = 0;
        for path in paths {
            if self.register_document(path) {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn contains(&self, version_id: &str) -> bool {
        self.entries.iter().any(|e| e.id == version_id)
    }

    pub fn version_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn infos(&self) -> Vec<CorpusInfo> {
        self.entries.iter().map(Entry::info).collect()
    }

    /// The version with this id, or the first registered one.
    pub fn version(&self, version_id: &str) -> Option<&Version> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == version_id)
            .or_else(|| self.entries.first())?;
        entry.load()
    }

    pub fn resolve_chapter(
        &self,
        version_id: &str,
        book_id: &str,
        chapter: u32,
    ) -> Option<ChapterView> {
        let version = self.version(version_id)?;
        let book = version.book(book_id)?;
        let found = book.chapter(chapter)?;
        Some(ChapterView {
            version_id: version.id.clone(),
            book_id: book.id.clone(),
            book_display_name: book.name.clone(),
            chapter: found.chapter,
            verses: found.verses.clone(),
        })
    }

    pub fn list_books(&self, version_id: &str, locale: Locale) -> Vec<BookSummary> {
        let Some(version) = self.version(version_id) else {
            return Vec::new();
        };
        version
            .books
            .iter()
            .map(|book| BookSummary {
                id: book.id.clone(),
                name: structure::book_meta(&book.id)
                    .map(|meta| meta.name(locale).to_string())
                    .unwrap_or_else(|| book.name.clone()),
                chapter_count: book.chapters.len(),
            })
            .collect()
    }

    pub fn verse_count(&self, version_id: &str, book_id: &str, chapter: u32) -> usize {
        self.version(version_id)
            .and_then(|v| v.book(book_id))
            .and_then(|b| b.chapter(chapter))
            .map_or(0, |c| c.verses.len())
    }

    pub fn book_name(&self, book_id: &str, locale: Locale) -> String {
        structure::book_name(book_id, locale)
    }
}

/// Resolves chapters off the async executor. Document versions may parse a
/// large file on first use, so resolution runs on a blocking task.
#[derive(Clone)]
pub struct ChapterFetcher {
    repo: Arc<ScriptureRepository>,
}

impl ChapterFetcher {
    pub fn new(repo: Arc<ScriptureRepository>) -> Self {
        Self { repo }
    }

    pub async fn fetch(&self, request: &ChapterRequest) -> Option<ChapterView> {
        tracing::debug!(generation = request.generation, "chapter requested");
        self.resolve(&request.version_id, &request.book_id, request.chapter).await
    }

    /// [`ScriptureRepository::resolve_chapter`] on the blocking pool.
    pub async fn resolve(
        &self,
        version_id: &str,
        book_id: &str,
        chapter: u32,
    ) -> Option<ChapterView> {
        let repo = Arc::clone(&self.repo);
        let (version, book) = (version_id.to_string(), book_id.to_string());
        tracing::debug!(%version, %book, chapter, "fetching chapter");
        let task =
            tokio::task::spawn_blocking(move || repo.resolve_chapter(&version, &book, chapter));
        match task.await {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(error = %e, "chapter fetch task failed");
                None
            }
        }
    }
}
