use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use versebook::api::{
    short_id, ChapterPage, CmdMessage, CorpusListing, Insight, ListedNode, MessageLevel,
};
use versebook::corpus::BookSummary;
use versebook::i18n::{t, Text};
use versebook::model::{Locale, StudyNode, Theme};
use versebook::preferences::PrefKey;

use super::render::render_markdown;
use super::styles::palette;

const LINE_WIDTH: usize = 100;
/// Verse numbers are right-aligned in this many columns, plus one space.
const NUMBER_WIDTH: usize = 3;
const FOLDER_ICON: &str = "▸";
const REFERENCE_ICON: &str = "·";

/// Terminal width, capped so long lines stay readable.
fn line_width() -> usize {
    let (_, cols) = console::Term::stdout().size();
    (cols as usize).clamp(40, LINE_WIDTH)
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_chapter(page: &ChapterPage, locale: Locale, theme: Theme) {
    for line in format_chapter(page, locale, theme, line_width()) {
        println!("{}", line);
    }
}

fn format_chapter(page: &ChapterPage, locale: Locale, theme: Theme, width: usize) -> Vec<String> {
    let style = palette(theme);
    let view = &page.view;
    let mut lines = vec![
        format!(
            "{} {}",
            style
                .title
                .apply_to(format!("{} {}", view.book_display_name, view.chapter)),
            style.muted.apply_to(format!("({})", view.version_id))
        ),
        String::new(),
    ];

    for verse in &view.verses {
        let highlighted = page.highlight == Some(verse.verse);
        for (i, line) in numbered(verse.verse, &verse.text, width).into_iter().enumerate() {
            let (number, text) = line.split_at(NUMBER_WIDTH + 1);
            let number = if i == 0 {
                style.verse_number.apply_to(number).to_string()
            } else {
                number.to_string()
            };
            let text = if highlighted {
                style.highlight.apply_to(text).to_string()
            } else {
                text.to_string()
            };
            lines.push(format!("{}{}", number, text));
        }
    }

    if !page.commentary.is_empty() {
        lines.push(String::new());
        lines.push(
            style
                .section
                .apply_to(t(Text::Commentary, locale))
                .to_string(),
        );
        for (verse, note) in &page.commentary {
            for (i, line) in numbered(*verse, note, width).into_iter().enumerate() {
                if i == 0 {
                    let (number, text) = line.split_at(NUMBER_WIDTH + 1);
                    lines.push(format!("{}{}", style.verse_number.apply_to(number), text));
                } else {
                    lines.push(line);
                }
            }
        }
    }
    lines
}

/// Wraps `text` under a right-aligned number with a hanging indent. Every
/// returned line starts with exactly `NUMBER_WIDTH + 1` columns of gutter.
fn numbered(number: u32, text: &str, width: usize) -> Vec<String> {
    let gutter = NUMBER_WIDTH + 1;
    let body = wrap_text(text, width.saturating_sub(gutter));
    body.into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{:>w$} {}", number, line, w = NUMBER_WIDTH)
            } else {
                format!("{}{}", " ".repeat(gutter), line)
            }
        })
        .collect()
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

pub(super) fn print_books(books: &[BookSummary], locale: Locale) {
    let name_width = books.iter().map(|b| b.name.width()).max().unwrap_or(0);
    let label = t(Text::Chapters, locale).to_lowercase();
    for book in books {
        let padding = name_width.saturating_sub(book.name.width());
        println!(
            "  {:<6} {}{}  {}",
            book.id.dimmed(),
            book.name,
            " ".repeat(padding),
            format!("{} {}", book.chapter_count, label).dimmed()
        );
    }
}

pub(super) fn print_corpora(listing: &CorpusListing) {
    for item in &listing.items {
        let is_current = listing.current.as_deref() == Some(item.id.as_str());
        let marker = if is_current { "*".green() } else { " ".normal() };
        let language = item
            .language
            .map(|l| format!(" [{}]", l))
            .unwrap_or_default();
        let line = format!("{:<10} {}{}", item.id, item.name, language.dimmed());
        if is_current {
            println!("{} {}", marker, line.bold());
        } else {
            println!("{} {}", marker, line);
        }
    }
}

pub(super) fn print_tree(nodes: &[ListedNode], locale: Locale) {
    if nodes.is_empty() {
        return;
    }
    println!("{}", t(Text::Studies, locale).bold());
    for listed in nodes {
        println!("{}", tree_line(listed, LINE_WIDTH));
    }
}

fn tree_line(listed: &ListedNode, width: usize) -> String {
    let indent = "  ".repeat(listed.depth + 1);
    let icon = if listed.node.is_folder() {
        FOLDER_ICON
    } else {
        REFERENCE_ICON
    };
    let id = short_id(listed.node.id());
    let fixed = indent.width() + icon.width() + 1 + 2 + id.width();
    let name = truncate_to_width(listed.node.name(), width.saturating_sub(fixed));
    let name = if listed.node.is_folder() {
        name.bold()
    } else {
        name.normal()
    };
    format!("{}{} {}  {}", indent, icon, name, id.dimmed())
}

/// A single node: breadcrumb, then note text or folder contents.
pub(super) fn print_node(node: &StudyNode, breadcrumb: &[String], contents: &[ListedNode]) {
    println!("{}", breadcrumb.join(" › ").dimmed());
    println!(
        "{}  {}",
        node.name().bold(),
        short_id(node.id()).dimmed()
    );
    println!("--------------------------------");
    match node {
        StudyNode::Reference { content, .. } => {
            if !content.is_empty() {
                println!("{}", content);
            }
        }
        StudyNode::Folder { .. } => {
            for listed in contents {
                println!("{}", tree_line(listed, LINE_WIDTH));
            }
        }
    }
}

pub(super) fn print_insight(insight: &Insight) {
    let width = line_width();
    println!("{}", insight.heading.bold());
    for line in wrap_text(&format!("\"{}\"", insight.verse_text), width) {
        println!("{}", line.italic().dimmed());
    }
    println!();
    println!("{}", render_markdown(&insight.markdown, width));
}

pub(super) fn print_preferences(preferences: &[(PrefKey, String)]) {
    for (key, value) in preferences {
        println!("{} = {}", key, value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
