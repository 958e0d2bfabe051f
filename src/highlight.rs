//! Syntax highlighting for suggested code.
//!
//! The service never says which language it returned, so callers pass the
//! fixed language from `ui.language`.

use crate::{Error, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};
use tracing::{debug, warn};

const ANSI_RESET: &str = "\x1b[0m";

/// Code text plus its highlighted rendering. `text` is always the exact
/// code that was highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    pub language: String,
    pub text: String,
    pub rendered: String,
}

pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: &str) -> HighlightedCode;
}

/// Leaves code untouched. Used when output is not a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, language: &str) -> HighlightedCode {
        HighlightedCode {
            language: language.to_string(),
            text: code.to_string(),
            rendered: code.to_string(),
        }
    }
}

/// 24-bit ANSI highlighting backed by syntect's bundled grammars.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new(theme_name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes
            .remove(theme_name)
            .ok_or_else(|| Error::highlight(format!("Unknown theme: {}", theme_name)))?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> HighlightedCode {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .unwrap_or_else(|| {
                debug!("No grammar for '{}', using plain text", language);
                self.syntax_set.find_syntax_plain_text()
            });

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut rendered = String::with_capacity(code.len() * 2);

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => rendered.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
                Err(e) => {
                    warn!("Highlighting failed, showing plain code: {}", e);
                    return PlainHighlighter.highlight(code, language);
                }
            }
        }
        rendered.push_str(ANSI_RESET);

        HighlightedCode {
            language: language.to_string(),
            text: code.to_string(),
            rendered,
        }
    }
}
