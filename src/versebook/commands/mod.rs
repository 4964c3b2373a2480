use std::collections::BTreeMap;

use crate::corpus::{BookSummary, ChapterView, CorpusInfo};
use crate::model::{Locale, StudyNode};
use crate::preferences::PrefKey;

pub mod add;
pub mod books;
pub mod config;
pub mod corpora;
pub mod delete;
pub mod helpers;
pub mod insight;
pub mod list;
pub mod read;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of a tree listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedNode {
    pub depth: usize,
    pub node: StudyNode,
}

/// A chapter with its commentary, ready to print.
#[derive(Debug, Clone)]
pub struct ChapterPage {
    pub view: ChapterView,
    pub commentary: BTreeMap<u32, String>,
    pub highlight: Option<u32>,
}

/// A registry listing with the currently selected entry.
#[derive(Debug, Clone)]
pub struct CorpusListing {
    pub items: Vec<CorpusInfo>,
    pub current: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Insight {
    pub heading: String,
    pub verse_text: String,
    pub markdown: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_nodes: Vec<StudyNode>,
    pub listed_nodes: Vec<ListedNode>,
    /// Ancestry of the shown node, root first.
    pub breadcrumb: Vec<String>,
    pub chapter: Option<ChapterPage>,
    pub books: Vec<BookSummary>,
    pub corpora: Option<CorpusListing>,
    pub insight: Option<Insight>,
    pub preferences: Vec<(PrefKey, String)>,
    pub locale: Locale,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_affected_nodes(mut self, nodes: Vec<StudyNode>) -> Self {
        self.affected_nodes = nodes;
        self
    }

    pub fn with_listed_nodes(mut self, nodes: Vec<ListedNode>) -> Self {
        self.listed_nodes = nodes;
        self
    }

    pub fn with_chapter(mut self, page: ChapterPage) -> Self {
        self.chapter = Some(page);
        self
    }

    pub fn with_books(mut self, books: Vec<BookSummary>) -> Self {
        self.books = books;
        self
    }

    pub fn with_corpora(mut self, listing: CorpusListing) -> Self {
        self.corpora = Some(listing);
        self
    }

    pub fn with_insight(mut self, insight: Insight) -> Self {
        self.insight = Some(insight);
        self
    }

    pub fn with_preferences(mut self, preferences: Vec<(PrefKey, String)>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
