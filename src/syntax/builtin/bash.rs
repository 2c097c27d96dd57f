//! Bash language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::PatternRule;
use crate::theme::tokens::{
    SYNTAX_COMMENT, SYNTAX_CONSTANT, SYNTAX_FUNCTION, SYNTAX_KEYWORD, SYNTAX_NUMBER,
    SYNTAX_STRING,
};

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "in", "do", "done", "while", "until", "case",
    "esac", "function", "return", "local", "export", "readonly", "declare", "select",
];

const BUILTINS: &[&str] = &[
    "echo", "printf", "cd", "source", "exit", "set", "unset", "shift", "read", "test", "eval",
    "exec", "trap", "alias",
];

/// Create Bash language definition
pub fn bash_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Bash");
    for alias in ["sh", "shell", "zsh", "console"] {
        lang.add_alias(alias);
    }

    // A `#` only starts a comment at a word boundary
    lang.add_pattern(PatternRule::new("comment", r"(?:^|\s)#.*$", SYNTAX_COMMENT, 100));
    lang.add_pattern(PatternRule::new("double_string", r#""(?:[^"\\]|\\.)*""#, SYNTAX_STRING, 95));
    lang.add_pattern(PatternRule::new("single_string", r"'[^']*'", SYNTAX_STRING, 95));
    lang.add_pattern(PatternRule::new("variable", r"\$(?:\{[^}]*\}|\w+|[@#?$!*0-9])", SYNTAX_CONSTANT, 90));
    lang.add_pattern(PatternRule::words("keyword", KEYWORDS, SYNTAX_KEYWORD, 80));
    lang.add_pattern(PatternRule::words("builtin", BUILTINS, SYNTAX_FUNCTION, 75));
    lang.add_pattern(PatternRule::new("flag", r"(?:^|\s)--?[A-Za-z][\w-]*", SYNTAX_CONSTANT, 60));
    lang.add_pattern(PatternRule::new("number", r"\b\d+\b", SYNTAX_NUMBER, 50));

    lang
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_echo() {
        let line = r#"echo "hello $USER" # greet"#;
        let spans = bash_language().highlight_line(line);
        let tokens: Vec<_> = spans.iter().map(|s| (&line[s.start..s.end], s.token)).collect();

        assert_eq!(
            tokens,
            [
                ("echo", SYNTAX_FUNCTION),
                (r#""hello $USER""#, SYNTAX_STRING),
                (" # greet", SYNTAX_COMMENT),
            ]
        );
    }

    #[test]
    fn test_bash_hash_in_word_is_not_comment() {
        let line = "echo a#b";
        let spans = bash_language().highlight_line(line);
        assert!(spans.iter().all(|s| s.token != SYNTAX_COMMENT));
    }
}
