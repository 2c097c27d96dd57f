//! TOML theme files
//!
//! A theme maps token names to styles:
//!
//! ```toml
//! [tokens]
//! "content.heading.h1" = { fg = "bright-magenta", bold = true }
//! "content.link" = "#5fafff"
//! "code.comment" = { fg = "gray", italic = true }
//! ```
//!
//! Tokens a theme does not mention keep their built-in style.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use toml::{Table, Value};

use super::style::{Color, Style};
use super::ThemeProvider;
use crate::error::{ChromaError, Result};

/// Theme loaded from a TOML document
#[derive(Debug, Clone, Default)]
pub struct TomlTheme {
    styles: HashMap<String, Style>,
}

impl TomlTheme {
    /// Load a theme file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ChromaError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse theme file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table = contents
            .parse::<Table>()
            .map_err(|e| ChromaError::Theme(e.to_string()))?;

        let mut styles = HashMap::new();
        let Some(tokens) = table.get("tokens") else {
            return Ok(Self { styles });
        };
        let tokens = tokens
            .as_table()
            .ok_or_else(|| ChromaError::Theme("'tokens' must be a table".into()))?;

        for (token, value) in tokens {
            styles.insert(token.clone(), parse_style(token, value)?);
        }

        Ok(Self { styles })
    }

    /// Number of tokens this theme styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl ThemeProvider for TomlTheme {
    fn style_for(&self, token: &str) -> Option<Style> {
        self.styles.get(token).copied()
    }
}

fn parse_style(token: &str, value: &Value) -> Result<Style> {
    match value {
        Value::String(name) => Ok(Style::fg(parse_color(token, name)?)),
        Value::Table(fields) => {
            let mut style = Style::default();
            for (field, value) in fields {
                match (field.as_str(), value) {
                    ("fg", Value::String(name)) => style.fg = parse_color(token, name)?,
                    ("bg", Value::String(name)) => style.bg = parse_color(token, name)?,
                    ("bold", Value::Boolean(on)) => style.bold = *on,
                    ("italic", Value::Boolean(on)) => style.italic = *on,
                    ("underline", Value::Boolean(on)) => style.underline = *on,
                    ("dim", Value::Boolean(on)) => style.dim = *on,
                    _ => {
                        return Err(ChromaError::Theme(format!(
                            "{token}: unsupported field '{field}'"
                        )))
                    }
                }
            }
            Ok(style)
        }
        _ => Err(ChromaError::Theme(format!(
            "{token}: expected a color name or a style table"
        ))),
    }
}

fn parse_color(token: &str, name: &str) -> Result<Color> {
    Color::from_name(name)
        .ok_or_else(|| ChromaError::Theme(format!("{token}: unknown color '{name}'")))
}
