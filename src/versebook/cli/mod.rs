//! # CLI Layer
//!
//! One possible UI client for versebook. This is the only place that knows
//! about terminals, process exit codes and argument parsing.
//!
//! - `args.rs`: clap definitions
//! - `commands.rs`: context setup and per-command handlers
//! - `print.rs` / `render.rs` / `styles.rs`: turning a `CmdResult` into text
//! - `logging.rs`: the tracing subscriber

pub mod args;
mod commands;
pub mod logging;
mod print;
mod render;
mod styles;

pub use commands::run;
