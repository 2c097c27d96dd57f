//! TOML language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::PatternRule;
use crate::theme::tokens::{
    SYNTAX_COMMENT, SYNTAX_CONSTANT, SYNTAX_KEYWORD, SYNTAX_NUMBER, SYNTAX_STRING, SYNTAX_TYPE,
};

/// Create TOML language definition
pub fn toml_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("TOML");

    lang.add_pattern(PatternRule::new("comment", r"#.*$", SYNTAX_COMMENT, 100));
    lang.add_pattern(PatternRule::new("table", r"^\s*\[\[?[^\]]+\]\]?", SYNTAX_KEYWORD, 96));
    lang.add_pattern(PatternRule::new("basic_string", r#""(?:[^"\\]|\\.)*""#, SYNTAX_STRING, 95));
    lang.add_pattern(PatternRule::new("literal_string", r"'[^']*'", SYNTAX_STRING, 95));
    lang.add_pattern(PatternRule::new("key", r"^\s*[\w.-]+", SYNTAX_TYPE, 90));
    lang.add_pattern(PatternRule::words("boolean", &["true", "false"], SYNTAX_CONSTANT, 80));
    lang.add_pattern(PatternRule::new(
        "datetime",
        r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?",
        SYNTAX_NUMBER,
        75,
    ));
    lang.add_pattern(PatternRule::new("number", r"[+-]?\b\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?\b", SYNTAX_NUMBER, 70));

    lang
}
