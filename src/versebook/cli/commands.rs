use super::args::{Cli, Commands, StudyCommands};
use super::logging::{init_logging, LogConfig};
use super::print::{
    print_books, print_chapter, print_corpora, print_insight, print_messages, print_node,
    print_preferences, print_tree,
};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use versebook::api::{CmdResult, ConfigAction, Corpora, VersebookApi};
use versebook::editor::{edit_note, NoteBuffer};
use versebook::error::{Result, VersebookError};
use versebook::i18n::{t, Text};
use versebook::insight::{GeminiClient, InsightConfig};
use versebook::preferences::os_theme;
use versebook::store::fs_backend::FsBackend;
use versebook::store::mem_backend::MemBackend;
use versebook::store::StorageBackend;

type Api = VersebookApi<Box<dyn StorageBackend>, GeminiClient>;

struct AppContext {
    api: Api,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbose(cli.verbose));

    let mut ctx = init_context()?;
    // Listing the studies reports load problems itself.
    let lists_studies = matches!(cli.command, None | Some(Commands::Study(StudyCommands::List)));
    if !lists_studies {
        for warning in ctx.api.startup_warnings() {
            eprintln!("{}", warning.yellow());
        }
    }

    match cli.command {
        Some(Commands::Read {
            book,
            chapter,
            verse,
        }) => handle_read(&mut ctx, &book, chapter, verse).await,
        Some(Commands::Books) => handle_result(ctx.api.books()?),
        Some(Commands::Versions) => handle_result(ctx.api.versions()?),
        Some(Commands::Commentaries) => handle_result(ctx.api.commentaries()?),
        Some(Commands::Insight {
            book,
            chapter,
            verse,
        }) => handle_insight(&ctx, &book, chapter, verse).await,
        Some(Commands::Study(cmd)) => match cmd {
            StudyCommands::List => handle_result(ctx.api.list_studies()?),
            StudyCommands::Add { kind, name, parent } => {
                handle_result(ctx.api.add_study(kind, parent.as_deref(), &name)?)
            }
            StudyCommands::Delete { id, yes } => handle_delete(&mut ctx, &id, yes),
            StudyCommands::Show { id } => handle_show(&mut ctx, &id),
            StudyCommands::Edit { id, content } => handle_edit(&mut ctx, &id, content),
        },
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_result(ctx.api.list_studies()?),
    }
}

/// Data lives under `$VERSEBOOK_HOME` when set, else the platform data dir.
fn data_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("VERSEBOOK_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(home));
    }
    ProjectDirs::from("com", "versebook", "versebook").map(|d| d.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let data = data_dir();
    let backend: Box<dyn StorageBackend> = match &data {
        Some(dir) => {
            let root = dir.join("store");
            match std::fs::create_dir_all(&root) {
                Ok(()) => Box::new(FsBackend::new(root)),
                Err(e) => {
                    tracing::warn!(
                        path = %root.display(),
                        error = %e,
                        "store unavailable, studies will not be saved"
                    );
                    Box::new(MemBackend::new())
                }
            }
        }
        None => {
            tracing::warn!("no data directory available, studies will not be saved");
            Box::new(MemBackend::new())
        }
    };

    let mut corpora = Corpora::bundled()?;
    let bibles = std::env::var_os("VERSEBOOK_BIBLES_DIR")
        .map(PathBuf::from)
        .or_else(|| data.as_ref().map(|d| d.join("bibles")));
    if let Some(dir) = bibles {
        match corpora.scripture.register_dir(&dir) {
            Ok(0) => {}
            Ok(n) => tracing::debug!(count = n, dir = %dir.display(), "registered versions"),
            Err(e) => tracing::warn!(error = %e, "skipping versions directory"),
        }
    }

    let insight_config = InsightConfig::from_env();
    let insight = GeminiClient::new(&insight_config)?;
    let api = VersebookApi::new(backend, corpora, insight, os_theme())
        .with_insight_timeout(insight_config.timeout);

    Ok(AppContext { api })
}

/// Prints whatever the result carries, then its messages.
fn handle_result(result: CmdResult) -> Result<()> {
    if !result.listed_nodes.is_empty() && result.affected_nodes.is_empty() {
        print_tree(&result.listed_nodes, result.locale);
    }
    if !result.books.is_empty() {
        print_books(&result.books, result.locale);
    }
    if let Some(listing) = &result.corpora {
        print_corpora(listing);
    }
    if !result.preferences.is_empty() {
        print_preferences(&result.preferences);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_read(
    ctx: &mut AppContext,
    book: &str,
    chapter: u32,
    verse: Option<u32>,
) -> Result<()> {
    let result = ctx.api.read(book, chapter, verse).await?;
    if let Some(page) = &result.chapter {
        let theme = ctx.api.preferences().theme;
        print_chapter(page, result.locale, theme);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_insight(ctx: &AppContext, book: &str, chapter: u32, verse: u32) -> Result<()> {
    let result = ctx.api.insight(book, chapter, verse).await?;
    if let Some(insight) = &result.insight {
        print_insight(insight);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_study(id)?;
    if let Some(node) = result.affected_nodes.first() {
        print_node(node, &result.breadcrumb, &result.listed_nodes);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str, yes: bool) -> Result<()> {
    let node = ctx.api.find_study(id)?;
    if !node.children().is_empty() && !yes {
        let locale = ctx.api.preferences().locale;
        if !confirm(&format!("{} ({})", t(Text::ConfirmDelete, locale), node.name()))? {
            return Ok(());
        }
    }
    handle_result(ctx.api.delete_study(node.id())?)
}

fn handle_edit(ctx: &mut AppContext, id: &str, content: Option<String>) -> Result<()> {
    let node = ctx.api.find_study(id)?;
    let content = match content {
        Some(text) => text,
        None => {
            let Some(current) = node.content() else {
                return Err(VersebookError::Api(format!(
                    "'{}' is a folder; only references have notes",
                    node.name()
                )));
            };
            edit_note(&NoteBuffer::new(node.name(), current))?
        }
    };
    if node.content() == Some(content.as_str()) {
        return Ok(());
    }
    handle_result(ctx.api.update_study_content(node.id(), &content)?)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    handle_result(ctx.api.config(action)?)
}

/// Asks a yes/no question on stderr. Without a terminal the answer is no.
fn confirm(question: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        eprintln!("{} [y/N] (use --yes to skip this prompt)", question);
        return Ok(false);
    }
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim"))
}
