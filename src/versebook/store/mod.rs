//! # Storage Layer
//!
//! Versebook persists everything through a tiny key-value abstraction, the
//! [`StorageBackend`] trait. Each key holds one JSON document:
//!
//! | Key                 | Value                                   |
//! |---------------------|-----------------------------------------|
//! | `theme`             | `"light"` / `"dark"`                    |
//! | `language`          | `"en"` / `"pt"`                         |
//! | `bible_version`     | version id                              |
//! | `bible_commentary`  | commentary id (absent when none)        |
//! | `bible-study-data`  | the whole study forest                  |
//! | `bible-study-data-corrupt` | last study blob that failed to parse |
//!
//! Every key is independent and optional; readers fall back to defaults.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key under the data directory,
//!   written atomically (tmp file + rename).
//! - [`mem_backend::MemBackend`]: `RefCell<HashMap>`, for tests and as the
//!   session-only fallback when the data directory is unusable.
//!
//! ## Degradation
//!
//! Storage is never fatal. Higher layers log write failures and keep their
//! in-memory state, so the worst case is "changes are not remembered next
//! session". The one exception is study data that fails to parse: it is
//! copied aside before anything may overwrite it, and if that copy fails the
//! study store never writes at all.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/store/
//! ├── theme.json
//! ├── language.json
//! ├── bible_version.json
//! ├── bible_commentary.json
//! └── bible-study-data.json
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod study;

pub use backend::StorageBackend;
pub use study::{StoreChange, StudyStore, CORRUPT_STUDY_DATA_KEY, STUDY_DATA_KEY};
