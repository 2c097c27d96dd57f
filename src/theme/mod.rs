//! Token and color mapping
//!
//! This module resolves semantic tokens to concrete styles:
//! - `tokens` names the tokens and holds the built-in ANSI table
//! - `style` turns styles into SGR escapes
//! - `file` loads user themes from TOML

mod file;
mod style;
pub mod tokens;

pub use file::TomlTheme;
pub use style::{strip_sgr, Color, Segment, Style, RESET};
pub use tokens::{builtin_style, token_for, Element};

/// External source of token styles
///
/// Returning `None` defers to the built-in table.
pub trait ThemeProvider: Send + Sync {
    fn style_for(&self, token: &str) -> Option<Style>;
}

/// Resolves tokens for one render call
#[derive(Clone, Copy)]
pub struct Palette<'a> {
    theme: Option<&'a dyn ThemeProvider>,
    color_enabled: bool,
}

impl<'a> Palette<'a> {
    pub fn new(theme: Option<&'a dyn ThemeProvider>, color_enabled: bool) -> Self {
        Self {
            theme,
            color_enabled,
        }
    }

    /// Palette that never emits escapes
    pub fn plain() -> Palette<'static> {
        Palette {
            theme: None,
            color_enabled: false,
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Style for `token`: theme first, then built-in table, then `text.primary`
    pub fn style_for(&self, token: &str) -> Style {
        if !self.color_enabled {
            return Style::default();
        }
        self.lookup(token)
            .or_else(|| self.lookup(tokens::TEXT_PRIMARY))
            .unwrap_or_default()
    }

    fn lookup(&self, token: &str) -> Option<Style> {
        self.theme
            .and_then(|theme| theme.style_for(token))
            .or_else(|| builtin_style(token))
    }

    /// Paint `text` with the style of `token`, reset included
    pub fn paint(&self, token: &str, text: &str) -> String {
        self.style_for(token).paint(text)
    }

    pub fn segment(&self, token: &str, text: impl Into<String>) -> Segment {
        Segment::new(text, self.style_for(token))
    }
}
