//! # versebook Architecture
//!
//! versebook is a scripture reader with per-verse commentary, generated verse
//! insights and a personal study notebook. Like any UI-agnostic core, the
//! library does the work and the CLI in `cli/` is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: preferences, studies, navigation       │
//! │  - Dispatches to commands, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per file, no terminal I/O                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!            ┌─────────────────┼──────────────────┐
//!            ▼                 ▼                  ▼
//!     store/ + tree.rs     corpus/            insight.rs
//!     study notebook,      versions,          Gemini client
//!     preferences          commentaries       behind a trait
//! ```
//!
//! ## Read-only vs Mutable State
//!
//! Corpora are loaded once and never change; they are shared behind `Arc`
//! so chapter loads can run on the blocking pool. The study tree is an
//! immutable [`tree::StudyForest`]: every edit builds a new forest, the
//! store swaps it in and persists it. Failed edits (unknown parent, unknown
//! id) leave the tree untouched and are reported as warnings, never panics.
//!
//! ## Navigation
//!
//! [`navigation::NavigationController`] holds what the reader is looking at:
//! the location, the selected study node, the active side-panel view and
//! whether that panel is open. Chapter loads are tagged with a generation
//! number so a slow load that finishes after the reader moved on is
//! discarded instead of overwriting the newer chapter.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests against `MemBackend`.
//! 2. **API** (`api.rs`): dispatch tests with a canned insight provider.
//! 3. **CLI** (`tests/cli.rs`): the binary end to end in a temp data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: facade
//! - [`commands`]: operations
//! - [`corpus`]: scripture and commentary registries
//! - [`navigation`]: reading position and selection
//! - [`store`], [`tree`], [`model`]: the study notebook
//! - [`preferences`]: theme, language, version, commentary
//! - [`insight`]: verse insights
//! - [`i18n`]: interface strings
//! - [`editor`]: `$EDITOR` integration for notes
//! - [`error`]: error type

pub mod api;
pub mod commands;
pub mod corpus;
pub mod editor;
pub mod error;
pub mod i18n;
pub mod insight;
pub mod model;
pub mod navigation;
pub mod preferences;
pub mod store;
pub mod tree;
