//! Rust language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::PatternRule;
use crate::theme::tokens::{
    SYNTAX_COMMENT, SYNTAX_CONSTANT, SYNTAX_FUNCTION, SYNTAX_KEYWORD, SYNTAX_NUMBER,
    SYNTAX_STRING, SYNTAX_TYPE,
};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
    "union", "unsafe", "use", "where", "while",
];

const TYPES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
    "i64", "i128", "isize", "f32", "f64",
];

/// Create Rust language definition
pub fn rust_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Rust");
    lang.add_alias("rs");

    lang.add_pattern(PatternRule::new("line_comment", r"//.*$", SYNTAX_COMMENT, 100));
    lang.add_pattern(PatternRule::new("block_comment", r"/\*.*?\*/", SYNTAX_COMMENT, 100));
    lang.add_pattern(PatternRule::new("string", r#""(?:[^"\\]|\\.)*""#, SYNTAX_STRING, 95));
    lang.add_pattern(PatternRule::new("char", r"'(?:[^'\\]|\\.)'", SYNTAX_STRING, 90));
    lang.add_pattern(PatternRule::new("attribute", r"#!?\[[^\]]*\]", SYNTAX_CONSTANT, 88));
    lang.add_pattern(PatternRule::new("macro", r"\b\w+!", SYNTAX_FUNCTION, 85));
    lang.add_pattern(PatternRule::words("keyword", KEYWORDS, SYNTAX_KEYWORD, 80));
    lang.add_pattern(PatternRule::words("boolean", &["true", "false"], SYNTAX_CONSTANT, 80));
    lang.add_pattern(PatternRule::words("primitive", TYPES, SYNTAX_TYPE, 75));
    lang.add_pattern(PatternRule::new("type_name", r"\b[A-Z][A-Za-z0-9_]*\b", SYNTAX_TYPE, 60));
    lang.add_pattern(PatternRule::new(
        "number",
        r"\b(?:0x[0-9a-fA-F_]+|0b[01_]+|0o[0-7_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?)(?:[iuf](?:8|16|32|64|128|size))?\b",
        SYNTAX_NUMBER,
        50,
    ));

    lang
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_of(line: &str) -> Vec<(&str, &'static str)> {
        rust_language()
            .highlight_line(line)
            .into_iter()
            .map(|s| (&line[s.start..s.end], s.token))
            .collect()
    }

    #[test]
    fn test_rust_keywords() {
        let tokens = tokens_of("let mut x = 5;");
        assert_eq!(tokens[0], ("let", SYNTAX_KEYWORD));
        assert_eq!(tokens[1], ("mut", SYNTAX_KEYWORD));
        assert_eq!(tokens[2], ("5", SYNTAX_NUMBER));
    }

    #[test]
    fn test_rust_string_hides_keywords() {
        let tokens = tokens_of(r#"let s = "if let";"#);
        assert_eq!(tokens, [("let", SYNTAX_KEYWORD), (r#""if let""#, SYNTAX_STRING)]);
    }

    #[test]
    fn test_rust_comment() {
        let tokens = tokens_of("// fn main() {}");
        assert_eq!(tokens, [("// fn main() {}", SYNTAX_COMMENT)]);
    }

    #[test]
    fn test_rust_macro_and_types() {
        let tokens = tokens_of("println!(\"{}\", Vec::<u8>::new());");
        assert_eq!(tokens[0], ("println!", SYNTAX_FUNCTION));
        assert!(tokens.contains(&("Vec", SYNTAX_TYPE)));
        assert!(tokens.contains(&("u8", SYNTAX_TYPE)));
    }
}
