//! # Domain Model: Study Nodes, Locations and Preferences Values
//!
//! This module defines the small vocabulary shared by every layer:
//! [`StudyNode`] (the notebook tree), [`Location`] (the reading position),
//! and the preference enums [`Locale`], [`Theme`] and [`ActiveView`].
//!
//! ## Study Nodes
//!
//! A study node is either a **folder** (named, with ordered children) or a
//! **reference** (named, with free-form note text). The two shapes are
//! mutually exclusive, so they are modelled as one enum rather than a struct
//! with optional fields.
//!
//! The persisted form is the same JSON blob the notebook has always used:
//!
//! ```text
//! [
//!   { "type": "folder", "id": "…", "name": "Romans", "children": [
//!       { "type": "reference", "id": "…", "name": "Rom 8:28", "content": "…" }
//!   ] }
//! ]
//! ```
//!
//! Older blobs sometimes omit `children` or `content`; both default to empty.
//!
//! ## Identity
//!
//! Ids are opaque strings. New nodes get a UUID v4, but ids loaded from disk
//! are kept verbatim (timestamps from older data are valid ids too). The only
//! requirement is uniqueness across the whole forest.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StudyNode {
    Folder {
        id: String,
        name: String,
        #[serde(default)]
        children: Vec<StudyNode>,
    },
    Reference {
        id: String,
        name: String,
        #[serde(default)]
        content: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Reference,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Reference => "reference",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "folder" | "topic" | "f" => Ok(NodeKind::Folder),
            "reference" | "ref" | "note" | "r" => Ok(NodeKind::Reference),
            other => Err(format!(
                "Unknown node type '{}' (expected folder or reference)",
                other
            )),
        }
    }
}

impl StudyNode {
    pub fn new(kind: NodeKind, id: String, name: String) -> Self {
        match kind {
            NodeKind::Folder => StudyNode::Folder {
                id,
                name,
                children: Vec::new(),
            },
            NodeKind::Reference => StudyNode::Reference {
                id,
                name,
                content: String::new(),
            },
        }
    }

    pub fn id(&self) -> &str {
        match self {
            StudyNode::Folder { id, .. } | StudyNode::Reference { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StudyNode::Folder { name, .. } | StudyNode::Reference { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            StudyNode::Folder { .. } => NodeKind::Folder,
            StudyNode::Reference { .. } => NodeKind::Reference,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, StudyNode::Folder { .. })
    }

    /// Children of a folder; references have none.
    pub fn children(&self) -> &[StudyNode] {
        match self {
            StudyNode::Folder { children, .. } => children,
            StudyNode::Reference { .. } => &[],
        }
    }

    /// Note text of a reference; folders carry no content.
    pub fn content(&self) -> Option<&str> {
        match self {
            StudyNode::Reference { content, .. } => Some(content),
            StudyNode::Folder { .. } => None,
        }
    }
}

/// The current reading position. Chapter and verse are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub book_id: String,
    pub chapter: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,
}

impl Location {
    pub fn chapter(book_id: impl Into<String>, chapter: u32) -> Self {
        Self {
            book_id: book_id.into(),
            chapter,
            verse: None,
        }
    }

    pub fn verse(book_id: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book_id: book_id.into(),
            chapter,
            verse: Some(verse),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verse {
            Some(verse) => write!(f, "{} {}:{}", self.book_id, self.chapter, verse),
            None => write!(f, "{} {}", self.book_id, self.chapter),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "pt" | "pt-br" | "portuguese" => Ok(Locale::Pt),
            other => Err(format!("Unsupported language '{}' (expected en or pt)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

/// Which pane is the primary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Scripture,
    Studies,
}
