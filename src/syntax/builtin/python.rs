//! Python language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::PatternRule;
use crate::theme::tokens::{
    SYNTAX_COMMENT, SYNTAX_CONSTANT, SYNTAX_FUNCTION, SYNTAX_KEYWORD, SYNTAX_NUMBER,
    SYNTAX_STRING, SYNTAX_TYPE,
};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
    "yield",
];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "dict", "enumerate", "filter", "float", "getattr", "isinstance",
    "int", "len", "list", "map", "max", "min", "open", "print", "range", "repr", "set",
    "sorted", "str", "sum", "super", "tuple", "type", "zip",
];

/// Create Python language definition
pub fn python_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Python");
    lang.add_alias("py");
    lang.add_alias("python3");

    lang.add_pattern(PatternRule::new("comment", r"#.*$", SYNTAX_COMMENT, 100));
    lang.add_pattern(PatternRule::new(
        "string",
        r#"[fFrRbBuU]{0,2}(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#,
        SYNTAX_STRING,
        95,
    ));
    lang.add_pattern(PatternRule::new("decorator", r"@[\w.]+", SYNTAX_CONSTANT, 90));
    lang.add_pattern(PatternRule::words("keyword", KEYWORDS, SYNTAX_KEYWORD, 80));
    lang.add_pattern(PatternRule::words("constant", &["True", "False", "None", "self", "cls"], SYNTAX_CONSTANT, 80));
    lang.add_pattern(PatternRule::words("builtin", BUILTINS, SYNTAX_FUNCTION, 75));
    lang.add_pattern(PatternRule::new("class_name", r"\b[A-Z][A-Za-z0-9_]*\b", SYNTAX_TYPE, 60));
    lang.add_pattern(PatternRule::new(
        "number",
        r"\b(?:0[xX][0-9a-fA-F_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?j?)\b",
        SYNTAX_NUMBER,
        50,
    ));

    lang
}
