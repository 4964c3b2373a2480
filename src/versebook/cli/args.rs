use clap::{Parser, Subcommand};
use versebook::model::NodeKind;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "versebook", bin_name = "versebook", version = get_version())]
#[command(about = "Read scripture with commentary and keep study notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a chapter, optionally focusing one verse
    #[command(alias = "r")]
    Read {
        /// Book id or name (gen, John, "1 João")
        book: String,

        chapter: u32,

        verse: Option<u32>,
    },

    /// List the books of the current version
    Books,

    /// List available scripture versions
    Versions,

    /// List available commentaries
    Commentaries,

    /// Ask for a short explanation of one verse
    #[command(alias = "i")]
    Insight {
        book: String,
        chapter: u32,
        verse: u32,
    },

    /// Manage study notes
    #[command(subcommand, alias = "s")]
    Study(StudyCommands),

    /// Get or set preferences (theme, language, version, commentary)
    Config {
        key: Option<String>,
        /// New value; `theme toggle` flips the theme, `commentary none` clears it
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudyCommands {
    /// Show the study tree
    #[command(alias = "ls")]
    List,

    /// Add a folder or reference
    #[command(alias = "n")]
    Add {
        /// folder (topic) or reference (note)
        kind: NodeKind,

        name: String,

        /// Id (or id prefix) of the parent folder
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Delete a node and everything inside it
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a node
    #[command(alias = "v")]
    Show { id: String },

    /// Edit the note of a reference (opens $EDITOR without --content)
    #[command(alias = "e")]
    Edit {
        id: String,

        #[arg(short, long)]
        content: Option<String>,
    },
}
