//! Style types for terminal output
//!
//! A `Style` is turned into SGR escape sequences with crossterm's
//! command encoders. Every painted span is closed with a full reset so
//! that no attribute leaks into the following text.

use std::borrow::Cow;
use std::sync::LazyLock;

use crossterm::style::{self as ct, Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::Command;
use regex::Regex;

/// The SGR reset sequence appended after every styled span
pub const RESET: &str = "\x1b[0m";

static SGR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;:]*[A-Za-z]").ok());

/// Terminal colors (ANSI 16-color palette plus true color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a theme file value
    ///
    /// Accepts ANSI names (`red`, `bright-blue`, `bright_blue`) and
    /// `#rrggbb` hex triplets.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex);
        }
        let color = match name.replace('_', "-").as_str() {
            "default" | "none" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }

    fn to_crossterm(self) -> Option<ct::Color> {
        let color = match self {
            Color::Default => return None,
            Color::Black => ct::Color::Black,
            Color::Red => ct::Color::DarkRed,
            Color::Green => ct::Color::DarkGreen,
            Color::Yellow => ct::Color::DarkYellow,
            Color::Blue => ct::Color::DarkBlue,
            Color::Magenta => ct::Color::DarkMagenta,
            Color::Cyan => ct::Color::DarkCyan,
            Color::White => ct::Color::Grey,
            Color::BrightBlack => ct::Color::DarkGrey,
            Color::BrightRed => ct::Color::Red,
            Color::BrightGreen => ct::Color::Green,
            Color::BrightYellow => ct::Color::Yellow,
            Color::BrightBlue => ct::Color::Blue,
            Color::BrightMagenta => ct::Color::Magenta,
            Color::BrightCyan => ct::Color::Cyan,
            Color::BrightWhite => ct::Color::White,
            Color::Rgb(r, g, b) => ct::Color::Rgb { r, g, b },
        };
        Some(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Faint text
    pub dim: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set dim
    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Layer `over` on top of this style
    ///
    /// Colors set in `over` win; attributes accumulate.
    pub fn merge(self, over: Style) -> Self {
        Self {
            fg: if over.fg == Color::Default { self.fg } else { over.fg },
            bg: if over.bg == Color::Default { self.bg } else { over.bg },
            bold: self.bold || over.bold,
            italic: self.italic || over.italic,
            underline: self.underline || over.underline,
            dim: self.dim || over.dim,
        }
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// SGR sequence that switches this style on
    ///
    /// Empty for the default style.
    pub fn escape(&self) -> String {
        let mut out = String::new();
        if let Some(color) = self.fg.to_crossterm() {
            push_command(&mut out, SetForegroundColor(color));
        }
        if let Some(color) = self.bg.to_crossterm() {
            push_command(&mut out, SetBackgroundColor(color));
        }
        if self.bold {
            push_command(&mut out, SetAttribute(Attribute::Bold));
        }
        if self.dim {
            push_command(&mut out, SetAttribute(Attribute::Dim));
        }
        if self.italic {
            push_command(&mut out, SetAttribute(Attribute::Italic));
        }
        if self.underline {
            push_command(&mut out, SetAttribute(Attribute::Underlined));
        }
        out
    }

    /// Wrap `text` in this style, followed by a reset
    ///
    /// The default style and empty text come back untouched.
    pub fn paint(&self, text: &str) -> String {
        if self.is_default() || text.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", self.escape(), text, RESET)
    }
}

/// Writing into a `String` cannot fail, so the fmt result is dropped.
fn push_command(out: &mut String, command: impl Command) {
    let _ = command.write_ansi(out);
}

/// Remove SGR and other CSI sequences from `text`
pub fn strip_sgr(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    match SGR_PATTERN.as_ref() {
        Some(pattern) => pattern.replace_all(text, ""),
        None => Cow::Owned(text.replace('\x1b', "")),
    }
}

/// A styled run of text within a rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}
