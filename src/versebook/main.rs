//! # versebook CLI
//!
//! The binary is thin: it starts the async runtime, runs `cli::run()` and
//! turns an error into exit code 1. Everything user-facing (argument
//! parsing, context wiring, printing) lives in `cli/`; everything else is in
//! the `versebook` library behind `api.rs`.
//!
//! ```text
//! cli/ (clap, printing)  →  api.rs (facade)  →  commands/*  →  store, corpus, insight
//! ```
//!
//! ## Environment
//!
//! | Variable               | Meaning                                          |
//! |------------------------|--------------------------------------------------|
//! | `VERSEBOOK_HOME`       | data directory (studies, preferences, bibles/)   |
//! | `VERSEBOOK_BIBLES_DIR` | extra version documents, default `<home>/bibles` |
//! | `GEMINI_API_KEY`       | key for verse insights (`API_KEY` also accepted) |
//! | `RUST_LOG`             | overrides the log filter                         |

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
