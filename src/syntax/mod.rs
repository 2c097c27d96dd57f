//! Code highlighting
//!
//! Regex rule based highlighting for fenced code blocks:
//! - `rules` holds single-line pattern rules
//! - `language` groups rules into a language and highlights a line
//! - `set` looks languages up by fence tag

mod builtin;
mod language;
mod rules;
mod set;

pub use language::{LanguageDefinition, Span};
pub use rules::PatternRule;
pub use set::SyntaxSet;
