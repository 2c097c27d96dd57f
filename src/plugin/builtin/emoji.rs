//! Shortcode expansion
//!
//! Replaces `:name:` with a symbol from a fixed table. Codes that are
//! not in the table stay as typed.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{ChromaError, Result};
use crate::plugin::hooks::{Hook, HookContext};
use crate::plugin::registry::{PluginContext, Registry, ENABLED_KEY};

pub const NAME: &str = "emoji";

static SHORTCODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+-]+):").ok());

const TABLE: &[(&str, &str)] = &[
    ("check", "✓"),
    ("white_check_mark", "✅"),
    ("x", "✗"),
    ("warning", "⚠"),
    ("info", "ℹ"),
    ("star", "★"),
    ("heart", "♥"),
    ("arrow_right", "→"),
    ("arrow_left", "←"),
    ("bulb", "💡"),
    ("rocket", "🚀"),
    ("fire", "🔥"),
    ("tada", "🎉"),
    ("lock", "🔒"),
    ("bug", "🐛"),
    ("+1", "👍"),
    ("-1", "👎"),
];

pub fn register(registry: &mut Registry) -> bool {
    registry.register(NAME, init)
}

fn init(ctx: &mut PluginContext<'_>) -> Result<()> {
    ctx.declare_config(ENABLED_KEY, "true", "Expand :shortcode: names to symbols");
    if SHORTCODE.is_none() {
        return Err(ChromaError::plugin(NAME, "shortcode pattern failed to compile"));
    }
    ctx.hook(Hook::transform_content(expand));
    Ok(())
}

fn lookup(name: &str) -> Option<&'static str> {
    TABLE.iter().find(|(code, _)| *code == name).map(|(_, symbol)| *symbol)
}

fn expand(text: &str, _ctx: &HookContext<'_>) -> Result<String> {
    let Some(pattern) = SHORTCODE.as_ref() else {
        return Ok(text.to_string());
    };
    if !text.contains(':') {
        return Ok(text.to_string());
    }
    let expanded = pattern.replace_all(text, |caps: &Captures<'_>| {
        lookup(&caps[1]).map_or_else(|| caps[0].to_string(), str::to_string)
    });
    Ok(expanded.into_owned())
}
