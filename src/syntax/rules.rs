//! Pattern rules for code highlighting
//!
//! A rule is a regex plus the token its matches are styled with. Rules
//! are tried in priority order (highest first) and never look beyond the
//! line they are given.

use regex::Regex;

/// A single-line pattern rule
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token assigned to matches (`code.*`)
    pub token: &'static str,
    /// Priority (higher = matched first)
    pub priority: i32,
}

impl PatternRule {
    /// Create a new pattern rule; `None` if the pattern does not compile
    pub fn new(name: &str, pattern: &str, token: &'static str, priority: i32) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name: name.to_string(),
            pattern: regex,
            token,
            priority,
        })
    }

    /// Word-list rule: matches any of `words` as a whole word
    pub fn words(name: &str, words: &[&str], token: &'static str, priority: i32) -> Option<Self> {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(name, &format!(r"\b(?:{alternation})\b"), token, priority)
    }

    /// Find the first non-empty match in text starting at position
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.pattern
            .find_at(text, start)
            .filter(|m| !m.is_empty())
            .map(|m| (m.start(), m.end()))
    }
}
