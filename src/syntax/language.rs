//! Language definitions for code highlighting
//!
//! A `LanguageDefinition` is a named set of pattern rules plus the fence
//! tags that select it (`rust`, `rs`, ...).

use super::rules::PatternRule;

/// A highlighted range of a code line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Token to style the range with
    pub token: &'static str,
}

/// A complete language definition for syntax highlighting
pub struct LanguageDefinition {
    /// Language name (e.g., "Rust", "Python")
    pub name: String,
    /// Fence tags, lowercase (e.g., ["rust", "rs"])
    pub aliases: Vec<String>,
    /// Pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
}

impl LanguageDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_lowercase());
    }

    /// Add a pattern rule, keeping priority order
    pub fn add_pattern(&mut self, rule: Option<PatternRule>) {
        if let Some(rule) = rule {
            self.patterns.push(rule);
            self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
        }
    }

    /// Highlight a single line of code
    ///
    /// At each position the earliest match wins, ties going to the
    /// higher-priority rule. Text no rule matches gets no span.
    pub fn highlight_line(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let mut best: Option<(usize, usize, &PatternRule)> = None;
            for rule in &self.patterns {
                let Some((start, end)) = rule.find_at(text, pos) else {
                    continue;
                };
                // Rules are in priority order, so only a strictly earlier start wins
                if best.map_or(true, |(best_start, _, _)| start < best_start) {
                    best = Some((start, end, rule));
                }
                if start == pos {
                    break;
                }
            }

            match best {
                Some((start, end, rule)) => {
                    spans.push(Span {
                        start,
                        end,
                        token: rule.token,
                    });
                    pos = end;
                }
                None => break,
            }
        }

        spans
    }
}
