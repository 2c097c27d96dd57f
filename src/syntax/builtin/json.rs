//! JSON language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::PatternRule;
use crate::theme::tokens::{SYNTAX_CONSTANT, SYNTAX_NUMBER, SYNTAX_STRING, SYNTAX_TYPE};

/// Create JSON language definition
pub fn json_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("JSON");
    lang.add_alias("jsonc");

    lang.add_pattern(PatternRule::new("key", r#""(?:[^"\\]|\\.)*"\s*:"#, SYNTAX_TYPE, 100));
    lang.add_pattern(PatternRule::new("string", r#""(?:[^"\\]|\\.)*""#, SYNTAX_STRING, 95));
    lang.add_pattern(PatternRule::words("literal", &["true", "false", "null"], SYNTAX_CONSTANT, 80));
    lang.add_pattern(PatternRule::new("number", r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b", SYNTAX_NUMBER, 70));

    lang
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object() {
        let line = r#"{"id": 7, "ok": true, "name": "x"}"#;
        let spans = json_language().highlight_line(line);
        let tokens: Vec<_> = spans.iter().map(|s| (&line[s.start..s.end], s.token)).collect();
        assert_eq!(
            tokens,
            [
                (r#""id":"#, SYNTAX_TYPE),
                ("7", SYNTAX_NUMBER),
                (r#""ok":"#, SYNTAX_TYPE),
                ("true", SYNTAX_CONSTANT),
                (r#""name":"#, SYNTAX_TYPE),
                (r#""x""#, SYNTAX_STRING),
            ]
        );
    }
}
