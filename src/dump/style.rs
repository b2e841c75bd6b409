//! ANSI styling and highlight rules for rendered columns.
//!
//! A [`Theme`] carries one optional [`Rule`] per output column (index,
//! numeric, chars). A rule is a default style for the whole column plus an
//! ordered list of highlight patterns: exact strings, which match the
//! entire column text, and regular expressions, which paint matching
//! substrings. Everything is resolved at configuration time and read-only
//! during rendering.

use ansi_term::{Colour, Style as AnsiStyle};
use regex::Regex;

use super::types::error::{DumpError, Result};

/// A resolved ANSI style.
///
/// Parsed from a fixed vocabulary of comma-separated tokens: colour names
/// (`red`, `cyan`, ...), `on_<colour>` backgrounds, and the attributes
/// `bold`, `dimmed`, `italic`, `underline`, `blink`, and `reverse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Style(AnsiStyle);

impl Style {
    /// # Errors
    /// Returns `DumpError::UnknownStyle` for tokens outside the table.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut style = AnsiStyle::new();
        for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            style = apply_token(style, token)?;
        }
        Ok(Style(style))
    }

    /// Wraps `text` in this style's escape sequences.
    pub fn paint(&self, text: &str) -> String {
        self.0.paint(text).to_string()
    }
}

fn colour(name: &str) -> Option<Colour> {
    match name {
        "black" => Some(Colour::Black),
        "red" => Some(Colour::Red),
        "green" => Some(Colour::Green),
        "yellow" => Some(Colour::Yellow),
        "blue" => Some(Colour::Blue),
        "magenta" | "purple" => Some(Colour::Purple),
        "cyan" => Some(Colour::Cyan),
        "white" => Some(Colour::White),
        _ => None,
    }
}

fn apply_token(style: AnsiStyle, token: &str) -> Result<AnsiStyle> {
    if let Some(c) = colour(token) {
        return Ok(style.fg(c));
    }
    if let Some(bg) = token.strip_prefix("on_") {
        if let Some(c) = colour(bg) {
            return Ok(style.on(c));
        }
    }
    match token {
        "bold" => Ok(style.bold()),
        "dimmed" | "dim" => Ok(style.dimmed()),
        "italic" => Ok(style.italic()),
        "underline" => Ok(style.underline()),
        "blink" => Ok(style.blink()),
        "reverse" => Ok(style.reverse()),
        other => Err(DumpError::UnknownStyle(other.to_string())),
    }
}

/// A highlight pattern: either whole-column string equality or a regex
/// matched against substrings.
#[derive(Debug, Clone)]
enum Pattern {
    Exact(String),
    Regex(Regex),
}

/// Styling rule for one output column.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    default: Option<Style>,
    highlights: Vec<(Pattern, Style)>,
}

impl Rule {
    pub fn new() -> Self {
        Rule::default()
    }

    /// Sets the default style wrapping the whole column text.
    pub fn with_default(mut self, spec: &str) -> Result<Self> {
        self.default = Some(Style::parse(spec)?);
        Ok(self)
    }

    /// Adds an exact-string highlight. Exact rules match the entire
    /// column text and take precedence over regex rules.
    pub fn highlight_exact(mut self, pattern: &str, spec: &str) -> Result<Self> {
        let style = Style::parse(spec)?;
        self.highlights.push((Pattern::Exact(pattern.to_string()), style));
        Ok(self)
    }

    /// Adds a regex highlight painting matching substrings.
    pub fn highlight(mut self, pattern: &str, spec: &str) -> Result<Self> {
        let style = Style::parse(spec)?;
        self.highlights.push((Pattern::Regex(Regex::new(pattern)?), style));
        Ok(self)
    }

    fn paint_default(&self, out: &mut String, text: &str) {
        if text.is_empty() {
            return;
        }
        match &self.default {
            Some(style) => out.push_str(&style.paint(text)),
            None => out.push_str(text),
        }
    }

    /// Finds the leftmost regex match at or after `pos`. Rule order breaks
    /// ties at the same start position.
    fn earliest_match(&self, text: &str, pos: usize) -> Option<(usize, usize, Style)> {
        let mut best: Option<(usize, usize, Style)> = None;
        for (pattern, style) in &self.highlights {
            let Pattern::Regex(re) = pattern else { continue };
            if let Some(m) = re.find_at(text, pos) {
                let replace = match best {
                    Some((start, _, _)) => m.start() < start,
                    None => true,
                };
                if replace {
                    best = Some((m.start(), m.end(), *style));
                }
            }
        }
        best
    }

    /// Applies this rule to one column's rendered text.
    ///
    /// Highlighted spans override the default style; the default resumes
    /// for the unmatched spans between them.
    pub fn apply(&self, text: &str) -> String {
        // Whole-column exact matches win over any regex.
        for (pattern, style) in &self.highlights {
            if let Pattern::Exact(p) = pattern {
                if p == text {
                    return style.paint(text);
                }
            }
        }

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < text.len() {
            match self.earliest_match(text, pos) {
                Some((start, end, style)) if end > start => {
                    self.paint_default(&mut out, &text[pos..start]);
                    out.push_str(&style.paint(&text[start..end]));
                    pos = end;
                }
                _ => {
                    // No further (non-empty) matches.
                    self.paint_default(&mut out, &text[pos..]);
                    break;
                }
            }
        }
        out
    }
}

/// Per-column styling rules for one dump configuration. Read-only during
/// rendering and shareable across dumps.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub index: Option<Rule>,
    pub numeric: Option<Rule>,
    pub chars: Option<Rule>,
}

impl Theme {
    pub fn new() -> Self {
        Theme::default()
    }

    pub fn with_index(mut self, rule: Rule) -> Self {
        self.index = Some(rule);
        self
    }

    pub fn with_numeric(mut self, rule: Rule) -> Self {
        self.numeric = Some(rule);
        self
    }

    pub fn with_chars(mut self, rule: Rule) -> Self {
        self.chars = Some(rule);
        self
    }
}
