//! Commentary registry. Commentary is optional everywhere: no selection,
//! an unknown id, or a chapter without notes all resolve to an empty map.

use std::collections::BTreeMap;

use super::{bundled, Commentary, CorpusError, CorpusInfo};

#[derive(Debug, Default)]
pub struct CommentaryRepository {
    commentaries: Vec<Commentary>,
}

impl CommentaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundled() -> Result<Self, CorpusError> {
        let mut repo = Self::new();
        for commentary in bundled::commentaries()? {
            repo.register(commentary);
        }
        Ok(repo)
    }

    pub fn register(&mut self, commentary: Commentary) -> bool {
        if self.contains(&commentary.id) {
            tracing::warn!(id = %commentary.id, "duplicate commentary id ignored");
            return false;
        }
        self.commentaries.push(commentary);
        true
    }

    pub fn contains(&self, commentary_id: &str) -> bool {
        self.commentaries.iter().any(|c| c.id == commentary_id)
    }

    pub fn infos(&self) -> Vec<CorpusInfo> {
        self.commentaries
            .iter()
            .map(|c| CorpusInfo {
                id: c.id.clone(),
                name: c.name.clone(),
                language: Some(c.language),
            })
            .collect()
    }

    /// Verse number → note text for one chapter.
    pub fn resolve_commentary(
        &self,
        commentary_id: Option<&str>,
        book_id: &str,
        chapter: u32,
    ) -> BTreeMap<u32, String> {
        let Some(id) = commentary_id else {
            return BTreeMap::new();
        };
        self.commentaries
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.books.iter().find(|b| b.id == book_id))
            .and_then(|b| b.chapters.iter().find(|ch| ch.chapter == chapter))
            .map(|ch| {
                ch.verses
                    .iter()
                    .map(|v| (v.verse, v.text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
