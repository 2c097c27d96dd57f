//! Hook points and handler types
//!
//! Each hook point has its own handler signature:
//! - `RenderCode` may take over the output of fence and code lines
//! - `TransformContent` rewrites non-code text before inline parsing

use std::fmt;

use super::config::ConfigStore;
use crate::error::Result;
use crate::theme::Palette;

/// Named extension locations in the render pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    RenderCode,
    TransformContent,
}

impl HookPoint {
    pub fn name(&self) -> &'static str {
        match self {
            HookPoint::RenderCode => "render_code",
            HookPoint::TransformContent => "transform_content",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a `RenderCode` handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The handler produced the output for this line
    Handled(String),
    /// Let the next handler, or the default renderer, deal with it
    NotHandled,
}

/// A line of a fenced code block, as seen by `RenderCode` handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeEvent<'a> {
    Start { lang: Option<&'a str> },
    Line { raw: &'a str, lang: Option<&'a str> },
    End { lang: Option<&'a str> },
}

impl<'a> CodeEvent<'a> {
    /// Language tag of the enclosing fence
    pub fn lang(&self) -> Option<&'a str> {
        match *self {
            CodeEvent::Start { lang } | CodeEvent::Line { lang, .. } | CodeEvent::End { lang } => {
                lang
            }
        }
    }
}

/// What a handler can see while it runs
pub struct HookContext<'a> {
    plugin: &'a str,
    config: &'a ConfigStore,
    palette: Palette<'a>,
    width: usize,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(
        plugin: &'a str,
        config: &'a ConfigStore,
        palette: Palette<'a>,
        width: usize,
    ) -> Self {
        Self {
            plugin,
            config,
            palette,
            width,
        }
    }

    /// Name of the plugin that owns the running handler
    pub fn plugin(&self) -> &str {
        self.plugin
    }

    /// The owning plugin's value for `key`
    pub fn config(&self, key: &str) -> &str {
        self.config.get(self.plugin, key)
    }

    pub fn config_bool(&self, key: &str, fallback: bool) -> bool {
        self.config.get_bool(self.plugin, key, fallback)
    }

    /// Token resolution for the current render call
    pub fn palette(&self) -> &Palette<'a> {
        &self.palette
    }

    pub fn color_enabled(&self) -> bool {
        self.palette.color_enabled()
    }

    /// Content width of the current render call
    pub fn width(&self) -> usize {
        self.width
    }
}

pub type RenderCodeFn =
    dyn Fn(&CodeEvent<'_>, &HookContext<'_>) -> Result<HookOutcome> + Send + Sync;
pub type TransformFn = dyn Fn(&str, &HookContext<'_>) -> Result<String> + Send + Sync;

/// A handler for one hook point
pub enum Hook {
    RenderCode(Box<RenderCodeFn>),
    TransformContent(Box<TransformFn>),
}

impl Hook {
    pub fn render_code<F>(handler: F) -> Self
    where
        F: Fn(&CodeEvent<'_>, &HookContext<'_>) -> Result<HookOutcome> + Send + Sync + 'static,
    {
        Hook::RenderCode(Box::new(handler))
    }

    pub fn transform_content<F>(handler: F) -> Self
    where
        F: Fn(&str, &HookContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        Hook::TransformContent(Box::new(handler))
    }

    pub fn point(&self) -> HookPoint {
        match self {
            Hook::RenderCode(_) => HookPoint::RenderCode,
            Hook::TransformContent(_) => HookPoint::TransformContent,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hook({})", self.point())
    }
}
