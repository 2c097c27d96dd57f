//! Semantic tokens and their built-in styles
//!
//! Tokens are dotted names (`content.heading.h1`) so that theme files can
//! address them directly. Rendering code never picks colors itself; it
//! asks for the token of an element and resolves that through a palette.

use super::style::{Color, Style};

pub const HEADING_H1: &str = "content.heading.h1";
pub const HEADING_H2: &str = "content.heading.h2";
pub const HEADING_H3: &str = "content.heading.h3";
pub const HEADING_H4: &str = "content.heading.h4";
pub const HEADING_H5: &str = "content.heading.h5";
pub const HEADING_H6: &str = "content.heading.h6";
pub const CODE_BLOCK: &str = "content.code.block";
pub const CODE_INLINE: &str = "content.code.inline";
pub const CODE_FENCE: &str = "content.code.fence";
pub const LIST: &str = "content.list";
pub const QUOTE: &str = "content.quote";
pub const BOLD: &str = "content.emphasis.bold";
pub const ITALIC: &str = "content.emphasis.italic";
pub const LINK: &str = "content.link";
pub const RULE: &str = "content.rule";
pub const TEXT_PRIMARY: &str = "text.primary";
pub const TEXT_SECONDARY: &str = "text.secondary";

pub const SYNTAX_KEYWORD: &str = "code.keyword";
pub const SYNTAX_STRING: &str = "code.string";
pub const SYNTAX_COMMENT: &str = "code.comment";
pub const SYNTAX_NUMBER: &str = "code.number";
pub const SYNTAX_TYPE: &str = "code.type";
pub const SYNTAX_FUNCTION: &str = "code.function";
pub const SYNTAX_CONSTANT: &str = "code.constant";

/// Every token name known to the built-in table
pub const ALL_TOKENS: &[&str] = &[
    HEADING_H1,
    HEADING_H2,
    HEADING_H3,
    HEADING_H4,
    HEADING_H5,
    HEADING_H6,
    CODE_BLOCK,
    CODE_INLINE,
    CODE_FENCE,
    LIST,
    QUOTE,
    BOLD,
    ITALIC,
    LINK,
    RULE,
    TEXT_PRIMARY,
    TEXT_SECONDARY,
    SYNTAX_KEYWORD,
    SYNTAX_STRING,
    SYNTAX_COMMENT,
    SYNTAX_NUMBER,
    SYNTAX_TYPE,
    SYNTAX_FUNCTION,
    SYNTAX_CONSTANT,
];

/// Renderable document elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Heading of the given level (1-6 are styled)
    Heading(u8),
    /// A line inside a fenced code block
    CodeBlock,
    /// Backtick span within text
    CodeInline,
    /// Opening or closing fence line
    CodeFence,
    /// Bullet glyph or item number
    ListMarker,
    /// Block quote bar and body
    Quote,
    /// `**strong**` text
    Bold,
    /// `*emphasis*` text
    Italic,
    /// Link text
    Link,
    /// Horizontal rule
    Rule,
    /// Ordinary body text
    Text,
    /// De-emphasized text (link targets, annotations)
    Secondary,
}

/// Map an element to its token, falling back to `text.primary`
pub fn token_for(element: Element) -> &'static str {
    match element {
        Element::Heading(1) => HEADING_H1,
        Element::Heading(2) => HEADING_H2,
        Element::Heading(3) => HEADING_H3,
        Element::Heading(4) => HEADING_H4,
        Element::Heading(5) => HEADING_H5,
        Element::Heading(6) => HEADING_H6,
        Element::CodeBlock => CODE_BLOCK,
        Element::CodeInline => CODE_INLINE,
        Element::CodeFence => CODE_FENCE,
        Element::ListMarker => LIST,
        Element::Quote => QUOTE,
        Element::Bold => BOLD,
        Element::Italic => ITALIC,
        Element::Link => LINK,
        Element::Rule => RULE,
        Element::Secondary => TEXT_SECONDARY,
        Element::Text | Element::Heading(_) => TEXT_PRIMARY,
    }
}

/// Built-in ANSI style for a token, if the table knows it
pub fn builtin_style(token: &str) -> Option<Style> {
    let style = match token {
        HEADING_H1 => Style::fg(Color::BrightMagenta).with_bold().with_underline(),
        HEADING_H2 => Style::fg(Color::BrightBlue).with_bold(),
        HEADING_H3 => Style::fg(Color::BrightCyan).with_bold(),
        HEADING_H4 => Style::fg(Color::Green).with_bold(),
        HEADING_H5 => Style::fg(Color::Yellow).with_bold(),
        HEADING_H6 => Style::fg(Color::BrightBlack).with_bold(),
        CODE_BLOCK => Style::fg(Color::Yellow),
        CODE_INLINE => Style::fg(Color::BrightYellow),
        CODE_FENCE => Style::fg(Color::BrightBlack),
        LIST => Style::fg(Color::Cyan),
        QUOTE => Style::fg(Color::BrightBlack).with_italic(),
        BOLD => Style::default().with_bold(),
        ITALIC => Style::default().with_italic(),
        LINK => Style::fg(Color::Blue).with_underline(),
        RULE => Style::fg(Color::BrightBlack),
        TEXT_PRIMARY => Style::default(),
        TEXT_SECONDARY => Style::fg(Color::BrightBlack),
        SYNTAX_KEYWORD => Style::fg(Color::Magenta).with_bold(),
        SYNTAX_STRING => Style::fg(Color::Green),
        SYNTAX_COMMENT => Style::fg(Color::BrightBlack).with_italic(),
        SYNTAX_NUMBER => Style::fg(Color::Cyan),
        SYNTAX_TYPE => Style::fg(Color::Yellow),
        SYNTAX_FUNCTION => Style::fg(Color::Blue),
        SYNTAX_CONSTANT => Style::fg(Color::BrightRed),
        _ => return None,
    };
    Some(style)
}
