//! # Navigation and Selection
//!
//! [`NavigationController`] owns the reading position, the selected study
//! node, the active view and the side-panel state. It never touches storage
//! or corpora; callers feed it actions and render whatever
//! [`NavigationController::primary_content`] says.
//!
//! ## Rules
//!
//! - Selecting a chapter or verse clears the study selection and switches to
//!   the scripture view. Selecting a verse also collapses the side panel.
//! - Selecting a study node switches to the studies view but keeps the
//!   reading position, so switching back resumes where the reader left off.
//! - After every tree mutation the selection is re-resolved by id; if the
//!   node is gone the selection is cleared, never re-pointed.
//!
//! ## Stale Chapter Responses
//!
//! Chapter text may arrive asynchronously. Each [`ChapterRequest`] carries a
//! generation number; [`NavigationController::accept_chapter`] only accepts
//! a response whose request is the latest one issued and still matches the
//! current version and location.

use crate::model::{ActiveView, Location, StudyNode};
use crate::tree::StudyForest;

/// Side effects the presentation layer should carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CollapseSidePanel,
}

/// What the main pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryContent<'a> {
    Scripture(&'a Location),
    Study(&'a StudyNode),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRequest {
    pub generation: u64,
    pub version_id: String,
    pub book_id: String,
    pub chapter: u32,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    location: Option<Location>,
    selected: Option<StudyNode>,
    active_view: ActiveView,
    nav_open: bool,
    version_id: String,
    chapter_generation: u64,
}

impl NavigationController {
    /// Starts at Genesis 1 with the side panel open.
    pub fn new(version_id: impl Into<String>) -> Self {
        Self {
            location: Some(Location::chapter("gen", 1)),
            selected: None,
            active_view: ActiveView::Scripture,
            nav_open: true,
            version_id: version_id.into(),
            chapter_generation: 0,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn selected_node(&self) -> Option<&StudyNode> {
        self.selected.as_ref()
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    pub fn select_chapter(&mut self, book_id: &str, chapter: u32) {
        self.location = Some(Location::chapter(book_id, chapter));
        self.selected = None;
        self.active_view = ActiveView::Scripture;
    }

    pub fn select_verse(&mut self, book_id: &str, chapter: u32, verse: u32) -> Effect {
        self.location = Some(Location::verse(book_id, chapter, verse));
        self.selected = None;
        self.active_view = ActiveView::Scripture;
        self.nav_open = false;
        Effect::CollapseSidePanel
    }

    pub fn select_study_node(&mut self, node: Option<StudyNode>) {
        if node.is_some() {
            self.active_view = ActiveView::Studies;
        }
        self.selected = node;
    }

    /// Tab switch: shows the view and opens the side panel.
    pub fn show_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.nav_open = true;
    }

    pub fn toggle_nav(&mut self) -> bool {
        self.nav_open = !self.nav_open;
        self.nav_open
    }

    /// Switching versions keeps the location; any in-flight chapter
    /// response for the old version becomes stale.
    pub fn set_version(&mut self, version_id: impl Into<String>) {
        self.version_id = version_id.into();
        self.chapter_generation += 1;
    }

    /// Re-resolves the selected node against the current forest.
    pub fn refresh_selection(&mut self, forest: &StudyForest) {
        let Some(selected) = &self.selected else {
            return;
        };
        self.selected = forest.find_node(selected.id()).cloned();
    }

    /// The location the scripture navigator highlights. Hidden while a
    /// study node is selected.
    pub fn focused_location(&self) -> Option<&Location> {
        match self.selected {
            Some(_) => None,
            None => self.location.as_ref(),
        }
    }

    pub fn primary_content(&self) -> PrimaryContent<'_> {
        match self.active_view {
            ActiveView::Scripture => self
                .location
                .as_ref()
                .map_or(PrimaryContent::Empty, PrimaryContent::Scripture),
            ActiveView::Studies => self
                .selected
                .as_ref()
                .map_or(PrimaryContent::Empty, PrimaryContent::Study),
        }
    }

    /// Issues a request for the current chapter, superseding any earlier one.
    pub fn request_chapter(&mut self) -> Option<ChapterRequest> {
        let location = self.location.as_ref()?;
        self.chapter_generation += 1;
        Some(ChapterRequest {
            generation: self.chapter_generation,
            version_id: self.version_id.clone(),
            book_id: location.book_id.clone(),
            chapter: location.chapter,
        })
    }

    pub fn accept_chapter(&self, request: &ChapterRequest) -> bool {
        let Some(location) = &self.location else {
            return false;
        };
        let current = request.generation == self.chapter_generation
            && request.version_id == self.version_id
            && request.book_id == location.book_id
            && request.chapter == location.chapter;
        if !current {
            tracing::debug!(
                generation = request.generation,
                latest = self.chapter_generation,
                "dropping stale chapter response"
            );
        }
        current
    }
}
