use super::backend::StorageBackend;
use crate::error::VersebookError;
use crate::model::{NodeKind, StudyNode};
use crate::tree::{Mutation, MutationOutcome, StudyForest};

/// Key under which the whole forest is persisted.
pub const STUDY_DATA_KEY: &str = "bible-study-data";

/// Key holding the last study blob that failed to parse.
pub const CORRUPT_STUDY_DATA_KEY: &str = "bible-study-data-corrupt";

/// What a store-level mutation did.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub outcome: MutationOutcome,
    /// Set when the change was applied in memory but could not be written.
    pub persist_error: Option<String>,
}

impl StoreChange {
    pub fn is_applied(&self) -> bool {
        self.outcome.is_applied()
    }
}

/// Owner of the study forest.
///
/// The forest is loaded once from the backend and rewritten in full after
/// every applied mutation. Persistence failures never undo a mutation: the
/// in-memory forest stays authoritative for the rest of the session.
///
/// Data that fails to parse is copied to [`CORRUPT_STUDY_DATA_KEY`] before
/// anything can overwrite it. When that copy (or the read itself) fails,
/// the store stays session-only and never writes [`STUDY_DATA_KEY`].
pub struct StudyStore<B: StorageBackend> {
    backend: B,
    forest: StudyForest,
    load_warning: Option<String>,
    writable: bool,
}

impl<B: StorageBackend> StudyStore<B> {
    /// Loads the forest. Missing data is an empty forest; unreadable or
    /// corrupt data is also treated as empty, with a warning kept for the UI.
    pub fn open(backend: B) -> Self {
        let raw = match backend.get(STUDY_DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::with_forest(backend, StudyForest::new()),
            Err(e) => {
                tracing::warn!(error = %e, "study data unreadable, notes will not be saved");
                return Self::read_only(backend, &e);
            }
        };
        let e = match serde_json::from_str::<StudyForest>(&raw) {
            Ok(forest) => return Self::with_forest(backend, forest),
            Err(e) => VersebookError::Serialization(e),
        };

        if let Err(backup) = backend.set(CORRUPT_STUDY_DATA_KEY, &raw) {
            tracing::warn!(
                error = %e,
                backup_error = %backup,
                "study data corrupt and could not be backed up"
            );
            return Self::read_only(backend, &e);
        }
        tracing::warn!(
            error = %e,
            key = CORRUPT_STUDY_DATA_KEY,
            "study data corrupt, original kept aside"
        );
        let mut store = Self::with_forest(backend, StudyForest::new());
        store.load_warning = Some(format!(
            "Study notes could not be loaded: {}. The original data was kept under '{}'.",
            e, CORRUPT_STUDY_DATA_KEY
        ));
        store
    }

    fn with_forest(backend: B, forest: StudyForest) -> Self {
        tracing::debug!(nodes = forest.count(), "study forest loaded");
        Self {
            backend,
            forest,
            load_warning: None,
            writable: true,
        }
    }

    fn read_only(backend: B, error: &VersebookError) -> Self {
        Self {
            backend,
            forest: StudyForest::new(),
            load_warning: Some(format!(
                "Study notes could not be loaded: {}. Changes will not be saved.",
                error
            )),
            writable: false,
        }
    }

    pub fn forest(&self) -> &StudyForest {
        &self.forest
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn find_node(&self, node_id: &str) -> Option<&StudyNode> {
        self.forest.find_node(node_id)
    }

    pub fn add(&mut self, kind: NodeKind, parent_id: Option<&str>, name: &str) -> StoreChange {
        let mutation = self.forest.add(kind, parent_id, name);
        self.commit(mutation)
    }

    pub fn delete(&mut self, node_id: &str) -> StoreChange {
        let mutation = self.forest.delete(node_id);
        self.commit(mutation)
    }

    pub fn update_reference_content(&mut self, node_id: &str, content: &str) -> StoreChange {
        let mutation = self.forest.update_reference_content(node_id, content);
        self.commit(mutation)
    }

    fn commit(&mut self, mutation: Mutation) -> StoreChange {
        let Mutation { forest, outcome } = mutation;
        if let MutationOutcome::Skipped(reason) = &outcome {
            tracing::debug!(%reason, "study mutation skipped");
            return StoreChange {
                outcome,
                persist_error: None,
            };
        }

        self.forest = forest;
        let persist_error = match self.persist() {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "study data not persisted; keeping changes for this session"
                );
                Some(e.to_string())
            }
        };
        StoreChange {
            outcome,
            persist_error,
        }
    }

    fn persist(&self) -> crate::error::Result<()> {
        if !self.writable {
            return Err(VersebookError::Store(
                "stored notes could not be read; refusing to overwrite them".to_string(),
            ));
        }
        let json = serde_json::to_string(&self.forest).map_err(VersebookError::Serialization)?;
        self.backend.set(STUDY_DATA_KEY, &json)
    }
}
