//! # API Facade
//!
//! The single entry point for every versebook operation, whatever the UI.
//! It owns the session state (preferences, study store, navigation) and the
//! read-only corpora, and dispatches to `commands/*.rs`.
//!
//! The facade normalizes inputs and returns `Result<CmdResult>`. It does no
//! business logic and no terminal I/O.
//!
//! ## Generic Over Backend and Provider
//!
//! `VersebookApi<B: StorageBackend, P: InsightProvider>`:
//! - Production: a filesystem backend and the Gemini client
//! - Testing: `MemBackend` and a canned provider
//!
//! One backend instance is shared by the preference store and the study
//! store; they use disjoint keys.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::{self, config::Registries};
use crate::corpus::{ChapterFetcher, CommentaryRepository, ScriptureRepository};
use crate::error::Result;
use crate::insight::{InsightProvider, DEFAULT_TIMEOUT};
use crate::model::{ActiveView, NodeKind, StudyNode, Theme};
use crate::navigation::NavigationController;
use crate::preferences::{AppPreferences, PreferenceStore};
use crate::store::{StorageBackend, StudyStore};

/// The registries a session reads from.
pub struct Corpora {
    pub scripture: ScriptureRepository,
    pub commentaries: CommentaryRepository,
}

impl Corpora {
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            scripture: ScriptureRepository::with_bundled()?,
            commentaries: CommentaryRepository::with_bundled()?,
        })
    }
}

pub struct VersebookApi<B: StorageBackend, P: InsightProvider> {
    prefs: PreferenceStore<Rc<B>>,
    studies: StudyStore<Rc<B>>,
    scripture: Arc<ScriptureRepository>,
    fetcher: ChapterFetcher,
    commentaries: CommentaryRepository,
    nav: NavigationController,
    insight: P,
    insight_timeout: Duration,
}

impl<B: StorageBackend, P: InsightProvider> VersebookApi<B, P> {
    pub fn new(backend: B, corpora: Corpora, insight: P, os_theme: Theme) -> Self {
        let backend = Rc::new(backend);
        let scripture = Arc::new(corpora.scripture);
        let prefs = PreferenceStore::load(Rc::clone(&backend), os_theme, &scripture.version_ids());
        let studies = StudyStore::open(backend);
        let nav = NavigationController::new(prefs.get().version_id.clone());
        Self {
            prefs,
            studies,
            fetcher: ChapterFetcher::new(Arc::clone(&scripture)),
            scripture,
            commentaries: corpora.commentaries,
            nav,
            insight,
            insight_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_insight_timeout(mut self, timeout: Duration) -> Self {
        self.insight_timeout = timeout;
        self
    }

    pub fn preferences(&self) -> &AppPreferences {
        self.prefs.get()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub async fn read(
        &mut self,
        book: &str,
        chapter: u32,
        verse: Option<u32>,
    ) -> Result<commands::CmdResult> {
        commands::read::run(
            &self.fetcher,
            &self.commentaries,
            &mut self.nav,
            self.prefs.get(),
            book,
            chapter,
            verse,
        )
        .await
    }

    pub fn books(&self) -> Result<commands::CmdResult> {
        commands::books::run(&self.scripture, self.prefs.get())
    }

    pub fn versions(&self) -> Result<commands::CmdResult> {
        commands::corpora::versions(&self.scripture, self.prefs.get())
    }

    pub fn commentaries(&self) -> Result<commands::CmdResult> {
        commands::corpora::commentaries(&self.commentaries, self.prefs.get())
    }

    pub async fn insight(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
    ) -> Result<commands::CmdResult> {
        commands::insight::run(
            &self.insight,
            &self.fetcher,
            self.prefs.get(),
            book,
            chapter,
            verse,
            self.insight_timeout,
        )
        .await
    }

    pub fn list_studies(&mut self) -> Result<commands::CmdResult> {
        self.nav.show_view(ActiveView::Studies);
        commands::list::run(&self.studies, self.prefs.get().locale)
    }

    pub fn add_study(
        &mut self,
        kind: NodeKind,
        parent: Option<&str>,
        name: &str,
    ) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.studies, &mut self.nav, kind, parent, name)
    }

    pub fn delete_study(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.studies, &mut self.nav, id)
    }

    pub fn show_study(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.studies, &mut self.nav, id, self.prefs.get().locale)
    }

    pub fn update_study_content(&mut self, id: &str, content: &str) -> Result<commands::CmdResult> {
        let locale = self.prefs.get().locale;
        commands::update::run(&mut self.studies, &mut self.nav, id, content, locale)
    }

    /// Resolves an id or prefix to the node itself, for editing flows.
    pub fn find_study(&self, id: &str) -> Result<StudyNode> {
        let full = commands::helpers::resolve_id(self.studies.forest(), id)?;
        self.studies
            .find_node(&full)
            .cloned()
            .ok_or(crate::error::VersebookError::NodeNotFound(full))
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let registries = Registries {
            scripture: &self.scripture,
            commentaries: &self.commentaries,
        };
        commands::config::run(&mut self.prefs, &mut self.nav, registries, action)
    }

    /// Problems found while opening the session, for the UI to surface.
    pub fn startup_warnings(&self) -> Vec<String> {
        self.studies
            .load_warning()
            .map(str::to_string)
            .into_iter()
            .collect()
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::helpers::short_id;
pub use crate::commands::{
    ChapterPage, CmdMessage, CmdResult, CorpusListing, Insight, ListedNode, MessageLevel,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::{InsightError, InsightRequest};
    use crate::model::Locale;
    use crate::store::mem_backend::MemBackend;
    use crate::store::STUDY_DATA_KEY;
    use std::future::Future;

    struct Echo;

    impl InsightProvider for Echo {
        fn fetch_insight(
            &self,
            req: &InsightRequest,
        ) -> impl Future<Output = std::result::Result<String, InsightError>> + Send {
            let text = format!("about {}", req.verse_text);
            async move { Ok(text) }
        }
    }

    fn api_with(backend: MemBackend) -> VersebookApi<MemBackend, Echo> {
        VersebookApi::new(backend, Corpora::bundled().unwrap(), Echo, Theme::Light)
    }

    #[test]
    fn starts_from_defaults() {
        let api = api_with(MemBackend::new());
        assert_eq!(api.preferences().version_id, "pt_aa");
        assert_eq!(api.preferences().locale, Locale::En);
        assert_eq!(api.navigation().version_id(), "pt_aa");
        assert!(api.startup_warnings().is_empty());
    }

    #[test]
    fn corrupt_study_data_is_reported_not_fatal() {
        let backend = MemBackend::new();
        backend.set(STUDY_DATA_KEY, "{not json").unwrap();
        let mut api = api_with(backend);
        assert_eq!(api.startup_warnings().len(), 1);
        let result = api.list_studies().unwrap();
        assert!(result.listed_nodes.is_empty());
    }

    #[test]
    fn study_operations_dispatch() {
        let mut api = api_with(MemBackend::new());
        let folder = api.add_study(NodeKind::Folder, None, "Romans").unwrap();
        let fid = folder.affected_nodes[0].id().to_string();
        let note = api
            .add_study(NodeKind::Reference, Some(&fid), "8:28")
            .unwrap();
        let rid = note.affected_nodes[0].id().to_string();

        api.update_study_content(short_id(&rid), "all things").unwrap();
        assert_eq!(api.find_study(&rid).unwrap().content(), Some("all things"));

        let shown = api.show_study(&rid).unwrap();
        assert_eq!(shown.breadcrumb, vec!["Romans", "8:28"]);
        assert_eq!(api.navigation().active_view(), ActiveView::Studies);

        api.delete_study(&fid).unwrap();
        assert!(api.list_studies().unwrap().listed_nodes.is_empty());
        assert!(api.navigation().selected_node().is_none());
    }

    #[test]
    fn config_changes_feed_later_reads() {
        let mut api = api_with(MemBackend::new());
        api.config(ConfigAction::Set("language".into(), "pt".into()))
            .unwrap();
        let books = api.books().unwrap();
        assert_eq!(books.books[1].name, "Êxodo");
        assert_eq!(books.locale, Locale::Pt);
    }

    #[tokio::test]
    async fn read_and_insight_dispatch() {
        let mut api = api_with(MemBackend::new());
        api.config(ConfigAction::Set("version".into(), "en_kjv".into()))
            .unwrap();
        let page = api.read("genesis", 1, Some(1)).await.unwrap().chapter.unwrap();
        assert_eq!(page.view.version_id, "en_kjv");
        assert!(!api.navigation().nav_open());

        let insight = api.insight("gen", 1, 1).await.unwrap().insight.unwrap();
        assert!(insight.markdown.starts_with("about In the beginning"));
    }
}
