//! # Markdown for the Terminal
//!
//! Insight text arrives as markdown. This module walks the pulldown-cmark
//! event stream and produces wrapped, styled lines: headings in bold yellow,
//! `**strong**` bold, `*emphasis*` italic, inline code in cyan, bullet and
//! numbered lists with hanging indents, fenced code indented and unwrapped.
//!
//! Layout (wrapping, indentation) is computed on the raw text with
//! `unicode-width`; styling is applied per fragment afterwards, so escape
//! codes never count toward the line width.
//!
//! Anything the renderer does not know (tables, images, html) degrades to
//! its plain text.

use colored::Colorize;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Span {
    bold: bool,
    italic: bool,
    code: bool,
    heading: bool,
}

#[derive(Debug, Clone)]
struct Fragment {
    text: String,
    span: Span,
}

/// A run of non-space text, possibly mixing styles ("**word**,").
type Word = Vec<Fragment>;

#[derive(Debug, Clone)]
enum Token {
    Word(Word),
    Break,
}

#[derive(Default)]
struct Renderer {
    width: usize,
    lines: Vec<String>,
    tokens: Vec<Token>,
    current: Word,
    bold: usize,
    italic: usize,
    heading: Option<HeadingLevel>,
    /// Open lists, innermost last. `Some(n)` is the next ordinal.
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    continuation: String,
    code_block: Option<String>,
}

/// Renders markdown into terminal lines no wider than `width` (long words
/// excepted), joined with newlines.
pub fn render_markdown(markdown: &str, width: usize) -> String {
    let mut renderer = Renderer {
        width: width.max(20),
        ..Renderer::default()
    };
    for event in Parser::new_ext(markdown, Options::all()) {
        renderer.event(event);
    }
    renderer.finish()
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                self.heading = Some(level);
            }
            Event::End(TagEnd::Heading(level)) => {
                self.flush();
                if matches!(level, HeadingLevel::H1 | HeadingLevel::H2) {
                    let rule = "─".repeat(self.width.min(40));
                    self.lines.push(rule.dimmed().to_string());
                }
                self.heading = None;
                self.blank();
            }
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Strong) => self.bold += 1,
            Event::End(TagEnd::Strong) => self.bold = self.bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.italic += 1,
            Event::End(TagEnd::Emphasis) => self.italic = self.italic.saturating_sub(1),
            Event::Start(Tag::List(start)) => {
                // Text of the enclosing item comes before the nested list.
                self.flush();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let indent = "  ".repeat(depth);
                self.continuation = format!("{}{}", indent, " ".repeat(marker.width()));
                self.item_marker = Some(format!("{}{}", indent, marker));
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.code_block = Some(String::new());
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = self.code_block.take() {
                    for line in code.lines() {
                        self.lines.push(format!("    {}", line.dimmed()));
                    }
                }
                self.blank();
            }
            Event::Text(text) => match self.code_block.as_mut() {
                Some(code) => code.push_str(&text),
                None => self.push_text(&text),
            },
            Event::Code(code) => {
                let span = Span {
                    code: true,
                    ..self.span()
                };
                self.current.push(Fragment {
                    text: code.to_string(),
                    span,
                });
            }
            Event::SoftBreak => self.end_word(),
            Event::HardBreak => {
                self.end_word();
                self.tokens.push(Token::Break);
            }
            Event::Rule => {
                self.flush();
                self.lines.push("─".repeat(self.width).dimmed().to_string());
                self.blank();
            }
            _ => {}
        }
    }

    fn span(&self) -> Span {
        Span {
            bold: self.bold > 0,
            italic: self.italic > 0,
            code: false,
            heading: self.heading.is_some(),
        }
    }

    fn push_text(&mut self, text: &str) {
        let span = self.span();
        for c in text.chars() {
            if c.is_whitespace() {
                self.end_word();
                continue;
            }
            match self.current.last_mut() {
                Some(frag) if frag.span == span => frag.text.push(c),
                _ => self.current.push(Fragment {
                    text: c.to_string(),
                    span,
                }),
            }
        }
    }

    fn end_word(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(Token::Word(std::mem::take(&mut self.current)));
        }
    }

    /// Lays out the pending tokens as one block.
    fn flush(&mut self) {
        self.end_word();
        if self.tokens.is_empty() {
            return;
        }
        let tokens = std::mem::take(&mut self.tokens);
        let (first, rest) = match self.item_marker.take() {
            Some(marker) => (marker, self.continuation.clone()),
            None if !self.lists.is_empty() => {
                (self.continuation.clone(), self.continuation.clone())
            }
            None => (String::new(), String::new()),
        };
        let wrapped = wrap(&tokens, &first, &rest, self.width);
        self.lines.extend(wrapped);
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}

fn word_width(word: &Word) -> usize {
    word.iter().map(|f| f.text.width()).sum()
}

fn paint(fragment: &Fragment) -> String {
    let Span {
        bold,
        italic,
        code,
        heading,
    } = fragment.span;
    let mut styled = fragment.text.normal();
    if heading {
        styled = styled.yellow().bold();
    }
    if code {
        styled = styled.cyan();
    }
    if bold {
        styled = styled.bold();
    }
    if italic {
        styled = styled.italic();
    }
    styled.to_string()
}

/// Greedy word wrap. `first` prefixes the first line, `rest` the others.
fn wrap(tokens: &[Token], first: &str, rest: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = first.to_string();
    let mut line_width = first.width();
    let mut empty = true;

    for token in tokens {
        match token {
            Token::Break => {
                lines.push(std::mem::replace(&mut line, rest.to_string()));
                line_width = rest.width();
                empty = true;
            }
            Token::Word(word) => {
                let w = word_width(word);
                if !empty && line_width + 1 + w > width {
                    lines.push(std::mem::replace(&mut line, rest.to_string()));
                    line_width = rest.width();
                    empty = true;
                }
                if !empty {
                    line.push(' ');
                    line_width += 1;
                }
                for fragment in word {
                    line.push_str(&paint(fragment));
                }
                line_width += w;
                empty = false;
            }
        }
    }
    if !empty {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(markdown: &str, width: usize) -> String {
        console::strip_ansi_codes(&render_markdown(markdown, width)).into_owned()
    }

    #[test]
    fn headings_and_paragraphs() {
        let out = plain("# Meaning\n\nGod creates.\n\n## Context\n\nText.", 80);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Meaning");
        assert!(lines[1].starts_with('─'));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "God creates.");
        assert!(out.ends_with("Text."));
    }

    #[test]
    fn inline_styles_keep_punctuation_attached() {
        let out = plain("The **Word**, and *light*.", 80);
        assert_eq!(out, "The Word, and light.");
    }

    #[test]
    fn paragraphs_wrap_to_width() {
        let text = "one two three four five six seven eight nine ten";
        let out = plain(text, 20);
        for line in out.lines() {
            assert!(line.width() <= 20, "{:?}", line);
        }
        assert_eq!(out.replace('\n', " "), text);
    }

    #[test]
    fn lists_get_markers_and_hanging_indent() {
        let out = plain("- alpha beta gamma delta\n- second\n\n1. first\n2. next", 20);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "• alpha beta gamma");
        assert_eq!(lines[1], "  delta");
        assert_eq!(lines[2], "• second");
        assert_eq!(lines[4], "1. first");
        assert_eq!(lines[5], "2. next");
    }

    #[test]
    fn nested_lists_indent() {
        let out = plain("- outer\n  - inner", 40);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["• outer", "  • inner"]);
    }

    #[test]
    fn code_blocks_are_not_wrapped() {
        let out = plain("```\nlet x = 1;\n```", 20);
        assert_eq!(out, "    let x = 1;");
    }
}
