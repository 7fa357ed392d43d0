//! # Syntax Highlighting
//!
//! Pure collaborator turning `(source, language)` into styled ratatui
//! lines. Backed by syntect's bundled syntax definitions, which are loaded
//! lazily on first use; a language syntect does not know falls back to
//! unstyled text.

use once_cell::sync::Lazy;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

use crate::workspace::Language;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Highlight `source` for display in the editor pane. One output line per
/// input line; the result borrows nothing from the input.
pub fn highlight(source: &str, language: Language) -> Vec<Line<'static>> {
    if language == Language::PlainText {
        return plain_lines(source);
    }

    let Some(theme) = THEME_SET.themes.get(HIGHLIGHT_THEME) else {
        return plain_lines(source);
    };
    let syntax = SYNTAX_SET
        .find_syntax_by_extension(language.highlight_token())
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for raw in source.split('\n') {
        match highlighter.highlight_line(raw, &SYNTAX_SET) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .map(|(style, text)| {
                        let fg = style.foreground;
                        Span::styled(
                            text.to_string(),
                            Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                        )
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            // A parse hiccup in one line should not take down the view.
            Err(_) => lines.push(Line::from(raw.to_string())),
        }
    }

    lines
}

fn plain_lines(source: &str) -> Vec<Line<'static>> {
    source
        .split('\n')
        .map(|line| Line::from(line.to_string()))
        .collect()
}
