//! Syntax highlighting for fenced code blocks
//!
//! Handles `CodeEvent::Line` for fences tagged with a known language.
//! Fence lines, unknown languages and colorless output are left to the
//! default renderer.

use crate::error::{ChromaError, Result};
use crate::plugin::hooks::{CodeEvent, Hook, HookContext, HookOutcome};
use crate::plugin::registry::{PluginContext, Registry, ENABLED_KEY};
use crate::syntax::SyntaxSet;
use crate::theme::tokens::CODE_BLOCK;

pub const NAME: &str = "highlight";

pub fn register(registry: &mut Registry) -> bool {
    registry.register(NAME, init)
}

fn init(ctx: &mut PluginContext<'_>) -> Result<()> {
    ctx.declare_config(ENABLED_KEY, "true", "Highlight fenced code with a known language");
    ctx.declare_config("indent", "2", "Spaces before each highlighted line");

    let syntaxes = SyntaxSet::builtin();
    ctx.hook(Hook::render_code(move |event, hook| render_line(&syntaxes, event, hook)));
    Ok(())
}

fn render_line(syntaxes: &SyntaxSet, event: &CodeEvent<'_>, ctx: &HookContext<'_>) -> Result<HookOutcome> {
    let CodeEvent::Line { raw, lang: Some(lang) } = *event else {
        return Ok(HookOutcome::NotHandled);
    };
    if !ctx.color_enabled() {
        return Ok(HookOutcome::NotHandled);
    }
    let Some(language) = syntaxes.find(lang) else {
        return Ok(HookOutcome::NotHandled);
    };

    let indent = ctx.config("indent");
    let indent: usize = indent.trim().parse().map_err(|_| {
        ChromaError::plugin(NAME, format!("indent must be a number, got '{indent}'"))
    })?;

    let palette = ctx.palette();
    let mut out = " ".repeat(indent);
    let mut pos = 0;
    for span in language.highlight_line(raw) {
        out.push_str(&palette.paint(CODE_BLOCK, &raw[pos..span.start]));
        out.push_str(&palette.paint(span.token, &raw[span.start..span.end]));
        pos = span.end;
    }
    out.push_str(&palette.paint(CODE_BLOCK, &raw[pos..]));

    Ok(HookOutcome::Handled(out))
}
