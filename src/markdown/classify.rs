//! Block-level line classification
//!
//! Each input line maps to exactly one `ClassifiedLine`. The only state
//! carried between lines is whether a fenced code block is open; while it
//! is, every line is code until the next fence.

use std::sync::LazyLock;

use regex::Regex;

/// The fence glyph that opens and closes code blocks
pub const FENCE: &str = "```";

/// Block construct recognized on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// `#`-prefixed heading, level 1-6
    Heading { level: u8, text: String },
    /// Opening fence with optional language tag
    CodeStart { lang: Option<String> },
    /// Raw line inside a fenced block
    CodeLine(String),
    /// Closing fence (explicit or implied by end of input)
    CodeEnd,
    /// Horizontal rule
    Hr,
    /// Block quote body
    Quote(String),
    /// Unordered list item; `indent` is the count of leading whitespace
    Bullet { indent: usize, text: String },
    /// Ordered list item; `text` keeps the item number (`"2. two"`)
    Numbered { indent: usize, text: String },
    /// Anything else, unchanged
    Text(String),
    /// Empty or whitespace-only line
    Blank,
}

/// Fence state threaded from line to line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pub in_code: bool,
    pub code_lang: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading,
    Rule,
    Quote,
    Bullet,
    Numbered,
}

/// A single-line block pattern, tried in table order
struct BlockRule {
    kind: BlockKind,
    pattern: Regex,
}

impl BlockRule {
    fn new(kind: BlockKind, pattern: &str) -> Option<Self> {
        Regex::new(pattern).ok().map(|pattern| Self { kind, pattern })
    }

    fn apply(&self, line: &str) -> Option<ClassifiedLine> {
        let caps = self.pattern.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let classified = match self.kind {
            BlockKind::Heading => ClassifiedLine::Heading {
                level: group(1).len() as u8,
                text: group(2).trim_end().to_string(),
            },
            BlockKind::Rule => ClassifiedLine::Hr,
            BlockKind::Quote => ClassifiedLine::Quote(group(1).to_string()),
            BlockKind::Bullet => ClassifiedLine::Bullet {
                indent: group(1).chars().count(),
                text: group(2).to_string(),
            },
            BlockKind::Numbered => ClassifiedLine::Numbered {
                indent: group(1).chars().count(),
                text: group(2).to_string(),
            },
        };
        Some(classified)
    }
}

static BLOCK_RULES: LazyLock<Vec<BlockRule>> = LazyLock::new(|| {
    [
        (BlockKind::Heading, r"^(#{1,6})[ \t]+(.*)$"),
        (BlockKind::Rule, r"^(?:-{3,}|\*{3,}|_{3,})[ \t]*$"),
        (BlockKind::Quote, r"^> ?(.*)$"),
        (BlockKind::Bullet, r"^([ \t]*)[-*+][ \t]+(.*)$"),
        (BlockKind::Numbered, r"^([ \t]*)(\d+\.[ \t]+.*)$"),
    ]
    .into_iter()
    .filter_map(|(kind, pattern)| BlockRule::new(kind, pattern))
    .collect()
});

/// Text following the fence glyph, if `line` is a fence
///
/// Up to three leading spaces are allowed before the glyph.
fn fence_info(line: &str) -> Option<&str> {
    let body = line.trim_start_matches(' ');
    if line.len() - body.len() > 3 {
        return None;
    }
    body.strip_prefix(FENCE)
        .map(|rest| rest.trim_start_matches('`'))
}

/// Classify one line given the state left by the previous line
///
/// Returns the classification and the state for the next line.
pub fn classify(line: &str, state: &ParserState) -> (ClassifiedLine, ParserState) {
    if let Some(info) = fence_info(line) {
        if state.in_code {
            // Any fence closes, trailing text is ignored
            return (ClassifiedLine::CodeEnd, ParserState::default());
        }
        let lang = info.split_whitespace().next().map(str::to_string);
        let next = ParserState {
            in_code: true,
            code_lang: lang.clone(),
        };
        return (ClassifiedLine::CodeStart { lang }, next);
    }

    if state.in_code {
        return (ClassifiedLine::CodeLine(line.to_string()), state.clone());
    }

    if line.trim().is_empty() {
        return (ClassifiedLine::Blank, state.clone());
    }

    let classified = BLOCK_RULES
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or_else(|| ClassifiedLine::Text(line.to_string()));
    (classified, state.clone())
}

/// Stateful classifier for one document pass
#[derive(Debug, Default)]
pub struct Classifier {
    state: ParserState,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fence state
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Classify the next line of the document
    pub fn next_line(&mut self, line: &str) -> ClassifiedLine {
        let (classified, next) = classify(line, &self.state);
        self.state = next;
        classified
    }

    /// End of input: closes a fence left open
    pub fn finish(&mut self) -> Option<ClassifiedLine> {
        let open = self.state.in_code;
        self.reset();
        open.then_some(ClassifiedLine::CodeEnd)
    }

    /// Forget all state, ready for a new document
    pub fn reset(&mut self) {
        self.state = ParserState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify_all(lines: &[&str]) -> Vec<ClassifiedLine> {
        let mut classifier = Classifier::new();
        let mut out: Vec<_> = lines.iter().map(|l| classifier.next_line(l)).collect();
        out.extend(classifier.finish());
        out
    }

    fn text(s: &str) -> ClassifiedLine {
        ClassifiedLine::Text(s.to_string())
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let state = ParserState::default();
        for line in ["hello world", "  indented prose", "a # not heading", "2024 was a year", "-dash"] {
            let (classified, next) = classify(line, &state);
            assert_eq!(classified, text(line));
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            classify_all(&["# Title", "###### Deep", "####### Too deep", "#NoSpace"]),
            vec![
                ClassifiedLine::Heading { level: 1, text: "Title".into() },
                ClassifiedLine::Heading { level: 6, text: "Deep".into() },
                text("####### Too deep"),
                text("#NoSpace"),
            ]
        );
    }

    #[test]
    fn test_rules_and_quotes() {
        assert_eq!(
            classify_all(&["---", "***  ", "___", "-*-", "> quoted", ">tight"]),
            vec![
                ClassifiedLine::Hr,
                ClassifiedLine::Hr,
                ClassifiedLine::Hr,
                text("-*-"),
                ClassifiedLine::Quote("quoted".into()),
                ClassifiedLine::Quote("tight".into()),
            ]
        );
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            classify_all(&["- one", "  * two", "+ three", "1. first", "   12. twelfth", "1.no space"]),
            vec![
                ClassifiedLine::Bullet { indent: 0, text: "one".into() },
                ClassifiedLine::Bullet { indent: 2, text: "two".into() },
                ClassifiedLine::Bullet { indent: 0, text: "three".into() },
                ClassifiedLine::Numbered { indent: 0, text: "1. first".into() },
                ClassifiedLine::Numbered { indent: 3, text: "12. twelfth".into() },
                text("1.no space"),
            ]
        );
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify_all(&["", "   ", "\t"]), vec![ClassifiedLine::Blank; 3]);
    }

    #[test]
    fn test_fenced_block() {
        assert_eq!(
            classify_all(&["```bash", "echo hi", "```"]),
            vec![
                ClassifiedLine::CodeStart { lang: Some("bash".into()) },
                ClassifiedLine::CodeLine("echo hi".into()),
                ClassifiedLine::CodeEnd,
            ]
        );
    }

    #[test]
    fn test_fence_hides_markdown() {
        assert_eq!(
            classify_all(&["```", "# not a heading", "- not a bullet", "", "```"]),
            vec![
                ClassifiedLine::CodeStart { lang: None },
                ClassifiedLine::CodeLine("# not a heading".into()),
                ClassifiedLine::CodeLine("- not a bullet".into()),
                ClassifiedLine::CodeLine("".into()),
                ClassifiedLine::CodeEnd,
            ]
        );
    }

    #[test]
    fn test_close_ignores_trailing_text() {
        assert_eq!(
            classify_all(&["```rust", "fn main() {}", "```python", "after"]),
            vec![
                ClassifiedLine::CodeStart { lang: Some("rust".into()) },
                ClassifiedLine::CodeLine("fn main() {}".into()),
                ClassifiedLine::CodeEnd,
                text("after"),
            ]
        );
    }

    #[test]
    fn test_state_tracks_language() {
        let (_, state) = classify("``` python extra", &ParserState::default());
        assert!(state.in_code);
        assert_eq!(state.code_lang.as_deref(), Some("python"));

        let (line, state) = classify("x = 1", &state);
        assert_eq!(line, ClassifiedLine::CodeLine("x = 1".into()));
        assert!(state.in_code);
    }

    #[test]
    fn test_indented_fence_limit() {
        let (line, _) = classify("   ```", &ParserState::default());
        assert_eq!(line, ClassifiedLine::CodeStart { lang: None });

        let (line, _) = classify("    ```", &ParserState::default());
        assert_eq!(line, text("    ```"));
    }

    #[test]
    fn test_unclosed_fence_closes_at_end() {
        assert_eq!(
            classify_all(&["```", "dangling"]),
            vec![
                ClassifiedLine::CodeStart { lang: None },
                ClassifiedLine::CodeLine("dangling".into()),
                ClassifiedLine::CodeEnd,
            ]
        );
    }

    #[test]
    fn test_reset() {
        let mut classifier = Classifier::new();
        classifier.next_line("```");
        assert!(classifier.state().in_code);
        classifier.reset();
        assert_eq!(classifier.next_line("# Back"), ClassifiedLine::Heading { level: 1, text: "Back".into() });
        assert_eq!(classifier.finish(), None);
    }
}
