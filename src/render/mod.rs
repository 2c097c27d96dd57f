//! Line-by-line terminal rendering
//!
//! Each input line is classified, offered to `RenderCode` hooks when it
//! belongs to a fenced block, and otherwise rendered with the default
//! style of its block. Non-code text goes through `TransformContent`
//! hooks and inline parsing, then is wrapped to the content width and
//! padded by the margin.

mod wrap;

use std::io::{BufRead, Write};

use log::debug;

use crate::error::Result;
use crate::markdown::{inline, ClassifiedLine, Classifier, InlineSpan, FENCE};
use crate::plugin::{CodeEvent, HookPoint, Registry};
use crate::theme::{strip_sgr, token_for, Element, Palette, Segment, Style, ThemeProvider};

pub use wrap::{segments_width, to_ansi, wrap};

/// Narrowest content width ever used
pub const MIN_WIDTH: usize = 10;

const BULLET: &str = "•";
const RULE_GLYPH: &str = "─";
const QUOTE_BAR: &str = "│";

/// User-facing render options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Blank lines above and spaces left of the output
    pub margin: usize,
    /// Requested content width; the terminal width when unset
    pub width: Option<usize>,
    pub color_enabled: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 0,
            width: None,
            color_enabled: true,
        }
    }
}

/// Resolved settings for one render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Columns available to content, margin excluded
    pub width: usize,
    pub margin: usize,
    pub color_enabled: bool,
}

impl RenderContext {
    /// Resolve options against the terminal width
    ///
    /// The content width never drops below `MIN_WIDTH` and never exceeds
    /// what is left of the terminal once both margins are taken.
    pub fn resolve(options: &RenderOptions, terminal_width: usize) -> Self {
        let widest = terminal_width
            .saturating_sub(2 * options.margin)
            .max(MIN_WIDTH);
        let width = options
            .width
            .unwrap_or(terminal_width)
            .clamp(MIN_WIDTH, widest);
        Self {
            width,
            margin: options.margin,
            color_enabled: options.color_enabled,
        }
    }
}

/// Writes finished lines with the margin applied
struct Emitter<W: Write> {
    out: W,
    margin: usize,
    started: bool,
}

impl<W: Write> Emitter<W> {
    fn new(out: W, margin: usize) -> Self {
        Self {
            out,
            margin,
            started: false,
        }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        if !self.started {
            for _ in 0..self.margin {
                writeln!(self.out)?;
            }
            self.started = true;
        }
        writeln!(self.out, "{:width$}{text}", "", width = self.margin)?;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Renders Markdown documents to the terminal
pub struct Renderer<'a> {
    registry: &'a Registry,
    palette: Palette<'a>,
    context: RenderContext,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry, context: RenderContext) -> Self {
        Self {
            registry,
            palette: Palette::new(None, context.color_enabled),
            context,
        }
    }

    /// Resolve tokens through `theme` before the built-in table
    pub fn with_theme(mut self, theme: &'a dyn ThemeProvider) -> Self {
        self.palette = Palette::new(Some(theme), self.context.color_enabled);
        self
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Render every line of `input` to `out`
    ///
    /// A fence still open at the end of input is closed implicitly.
    pub fn render<R: BufRead, W: Write>(&self, input: R, out: W) -> Result<()> {
        let mut classifier = Classifier::new();
        let mut emitter = Emitter::new(out, self.context.margin);

        for line in input.lines() {
            let line = line?;
            let open_lang = classifier.state().code_lang.clone();
            let classified = classifier.next_line(&line);
            for rendered in self.render_line(&classified, open_lang.as_deref()) {
                emitter.line(&rendered)?;
            }
        }

        let open_lang = classifier.state().code_lang.clone();
        if let Some(end) = classifier.finish() {
            debug!("closing unterminated code block");
            for rendered in self.render_line(&end, open_lang.as_deref()) {
                emitter.line(&rendered)?;
            }
        }
        emitter.finish()
    }

    /// Render a whole document held in memory
    pub fn render_str(&self, input: &str) -> Result<String> {
        let mut out = Vec::new();
        self.render(input.as_bytes(), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Output lines for one classified line
    ///
    /// `open_lang` is the language of the fence that was open before
    /// this line.
    fn render_line(&self, line: &ClassifiedLine, open_lang: Option<&str>) -> Vec<String> {
        let event = match line {
            ClassifiedLine::CodeStart { lang } => Some(CodeEvent::Start { lang: lang.as_deref() }),
            ClassifiedLine::CodeLine(raw) => Some(CodeEvent::Line { raw, lang: open_lang }),
            ClassifiedLine::CodeEnd => Some(CodeEvent::End { lang: open_lang }),
            _ => None,
        };
        if let Some(event) = event {
            if let Some(output) = self.hooked_code(&event) {
                return output;
            }
        }

        match line {
            ClassifiedLine::Heading { level, text } => self.heading(*level, text),
            ClassifiedLine::CodeStart { lang } => {
                let fence = format!("{FENCE}{}", lang.as_deref().unwrap_or(""));
                vec![self.palette.paint(token_for(Element::CodeFence), &fence)]
            }
            ClassifiedLine::CodeLine(raw) => {
                vec![format!("  {}", self.palette.paint(token_for(Element::CodeBlock), raw))]
            }
            ClassifiedLine::CodeEnd => vec![self.palette.paint(token_for(Element::CodeFence), FENCE)],
            ClassifiedLine::Hr => {
                let rule = RULE_GLYPH.repeat(self.context.width);
                vec![self.palette.paint(token_for(Element::Rule), &rule)]
            }
            ClassifiedLine::Quote(text) => self.quote(text),
            ClassifiedLine::Bullet { indent, text } => self.bullet(*indent, text),
            ClassifiedLine::Numbered { indent, text } => self.numbered(*indent, text),
            ClassifiedLine::Text(text) => {
                let body = self.inline_segments(text, self.body_style());
                wrap(&[], &body, &[], self.context.width)
            }
            ClassifiedLine::Blank => vec![String::new()],
        }
    }

    /// Output of the first `RenderCode` hook that handles `event`
    fn hooked_code(&self, event: &CodeEvent<'_>) -> Option<Vec<String>> {
        if !self.registry.has_hooks(HookPoint::RenderCode) {
            return None;
        }
        let output = self
            .registry
            .dispatch_render_code(event, self.palette, self.context.width)?;
        let lines = output
            .split('\n')
            .map(|line| {
                if self.context.color_enabled {
                    line.to_string()
                } else {
                    strip_sgr(line).into_owned()
                }
            })
            .collect();
        Some(lines)
    }

    fn heading(&self, level: u8, text: &str) -> Vec<String> {
        let style = self.palette.style_for(token_for(Element::Heading(level)));
        let marker = format!("{} ", "#".repeat(usize::from(level)));
        let continuation = [Segment::plain(" ".repeat(marker.len()))];
        let prefix = [Segment::new(marker, style)];
        let body = self.inline_segments(text, style);
        wrap(&prefix, &body, &continuation, self.context.width)
    }

    fn quote(&self, text: &str) -> Vec<String> {
        let style = self.palette.style_for(token_for(Element::Quote));
        let bar = [Segment::new(format!("{QUOTE_BAR} "), style)];
        let body = self.inline_segments(text, style);
        wrap(&bar, &body, &bar, self.context.width)
    }

    fn bullet(&self, indent: usize, text: &str) -> Vec<String> {
        let prefix = [
            Segment::plain(" ".repeat(indent)),
            self.palette.segment(token_for(Element::ListMarker), format!("{BULLET} ")),
        ];
        let continuation = [Segment::plain(" ".repeat(indent + 2))];
        let body = self.inline_segments(text, self.body_style());
        wrap(&prefix, &body, &continuation, self.context.width)
    }

    fn numbered(&self, indent: usize, text: &str) -> Vec<String> {
        let (number, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        let prefix = [
            Segment::plain(" ".repeat(indent + 2)),
            self.palette.segment(token_for(Element::ListMarker), number),
            Segment::plain(" "),
        ];
        let continuation = [Segment::plain(" ".repeat(segments_width(&prefix)))];
        let body = self.inline_segments(rest.trim_start(), self.body_style());
        wrap(&prefix, &body, &continuation, self.context.width)
    }

    /// Base style of ordinary prose
    fn body_style(&self) -> Style {
        self.palette.style_for(token_for(Element::Text))
    }

    /// Transform, inline-parse and style non-code text on top of `base`
    fn inline_segments(&self, text: &str, base: Style) -> Vec<Segment> {
        let text = self
            .registry
            .apply_transforms(text, self.palette, self.context.width);
        let styled = |token: &str| base.merge(self.palette.style_for(token));

        let mut segments = Vec::new();
        for span in inline(&text) {
            match span {
                InlineSpan::Plain(s) => segments.push(Segment::new(s, base)),
                InlineSpan::Code(s) => {
                    segments.push(Segment::new(s, styled(token_for(Element::CodeInline))))
                }
                InlineSpan::Bold(s) => segments.push(Segment::new(s, styled(token_for(Element::Bold)))),
                InlineSpan::Italic(s) => {
                    segments.push(Segment::new(s, styled(token_for(Element::Italic))))
                }
                InlineSpan::Link { text, url } => {
                    let show_url = !url.is_empty() && url != text;
                    segments.push(Segment::new(text, styled(token_for(Element::Link))));
                    if show_url {
                        segments.push(Segment::new(
                            format!(" ({url})"),
                            styled(token_for(Element::Secondary)),
                        ));
                    }
                }
            }
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChromaError;
    use crate::plugin::{register_builtins, Hook, HookOutcome};
    use crate::theme::{builtin_style, tokens, Color, RESET};
    use pretty_assertions::assert_eq;

    fn context(width: usize, margin: usize, color_enabled: bool) -> RenderContext {
        RenderContext {
            width,
            margin,
            color_enabled,
        }
    }

    fn render(registry: &Registry, ctx: RenderContext, input: &str) -> String {
        Renderer::new(registry, ctx).render_str(input).unwrap()
    }

    fn plain(input: &str) -> String {
        render(&Registry::new(), context(80, 0, false), input)
    }

    #[test]
    fn test_resolve_width() {
        let options = RenderOptions::default();
        assert_eq!(RenderContext::resolve(&options, 100).width, 100);

        let options = RenderOptions {
            margin: 4,
            width: Some(200),
            color_enabled: true,
        };
        assert_eq!(RenderContext::resolve(&options, 100).width, 92);

        let options = RenderOptions {
            width: Some(3),
            ..Default::default()
        };
        assert_eq!(RenderContext::resolve(&options, 100).width, MIN_WIDTH);

        // A margin wider than the terminal still leaves the minimum
        let options = RenderOptions {
            margin: 60,
            ..Default::default()
        };
        assert_eq!(RenderContext::resolve(&options, 100).width, MIN_WIDTH);
    }

    #[test]
    fn test_plain_document_is_unchanged_without_color() {
        let input = "Just some words.\nAnother line with 2 * 3 and a_b.\n";
        assert_eq!(plain(input), input);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let mut registry = Registry::new();
        register_builtins(&mut registry);
        registry.init_plugins();
        let input = "# Title\n\n- **one** :check:\n> quote\n```rust\nfn main() {}\n```\n";
        let ctx = context(40, 2, true);
        assert_eq!(render(&registry, ctx, input), render(&registry, ctx, input));
    }

    #[test]
    fn test_heading_blank_and_italic() {
        let out = render(&Registry::new(), context(80, 0, true), "# Heading\n\nSome *text*.\n");
        let lines: Vec<&str> = out.lines().collect();

        let h1 = builtin_style(tokens::HEADING_H1).unwrap().escape();
        assert_eq!(
            lines,
            [
                format!("{h1}# Heading{RESET}").as_str(),
                "",
                "Some \x1b[3mtext\x1b[0m.",
            ]
        );
    }

    #[test]
    fn test_fenced_block_default_rendering() {
        assert_eq!(plain("```bash\necho hi\n```\n"), "```bash\n  echo hi\n```\n");
    }

    #[test]
    fn test_unterminated_fence_is_closed() {
        assert_eq!(plain("```\nx = 1\n"), "```\n  x = 1\n```\n");
    }

    #[test]
    fn test_margin_pads_output() {
        let out = render(&Registry::new(), context(20, 4, true), "hello\n");
        assert_eq!(out, "\n\n\n\n    hello\n");
        assert_eq!(strip_sgr(&out), out);
    }

    #[test]
    fn test_block_decorations_use_their_tokens() {
        let out = render(&Registry::new(), context(10, 0, true), "- a\n---\n> q\n```\nx\n```\n");
        let lines: Vec<&str> = out.lines().collect();
        let style = |token: &str| builtin_style(token).unwrap();

        assert_eq!(lines[0], format!("{}a", style(tokens::LIST).paint("• ")));
        assert_eq!(lines[1], style(tokens::RULE).paint(&"─".repeat(10)));
        assert_eq!(lines[2], style(tokens::QUOTE).paint("│ q"));
        assert_eq!(lines[3], style(tokens::CODE_FENCE).paint("```"));
        assert_eq!(lines[4], format!("  {}", style(tokens::CODE_BLOCK).paint("x")));
    }

    #[test]
    fn test_every_line_is_padded() {
        let out = render(&Registry::new(), context(20, 2, false), "a\n\nb\n");
        assert_eq!(out, "\n\n  a\n  \n  b\n");
    }

    struct PrimaryTheme(Style);

    impl ThemeProvider for PrimaryTheme {
        fn style_for(&self, token: &str) -> Option<Style> {
            (token == tokens::TEXT_PRIMARY).then_some(self.0)
        }
    }

    #[test]
    fn test_prose_uses_primary_text_style() {
        let red = Style::fg(Color::Red);
        let theme = PrimaryTheme(red);
        let registry = Registry::new();
        let renderer = Renderer::new(&registry, context(80, 0, true)).with_theme(&theme);

        let out = renderer.render_str("hello\n- item\n").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], red.paint("hello"));
        assert!(lines[1].ends_with(&red.paint("item")));

        // Emphasis layers on top of the primary style
        let out = renderer.render_str("**hi**\n").unwrap();
        assert_eq!(out, format!("{}\n", red.with_bold().paint("hi")));
    }

    #[test]
    fn test_block_defaults_without_color() {
        let input = "## Sub\n> said *so*\n- item\n  * nested\n3. third\n---\nsee [docs](http://x.io) or [here](here)\n";
        assert_eq!(
            plain(input),
            "## Sub\n│ said so\n• item\n  • nested\n  3. third\n"
                .to_string()
                + &"─".repeat(80)
                + "\nsee docs (http://x.io) or here\n"
        );
    }

    #[test]
    fn test_long_lines_wrap_under_their_prefix() {
        let out = render(
            &Registry::new(),
            context(16, 0, false),
            "- alpha beta gamma delta\n> one two three four\n",
        );
        assert_eq!(
            out,
            "• alpha beta\n  gamma delta\n│ one two three\n│ four\n"
        );
    }

    #[test]
    fn test_wrapped_styles_never_dangle() {
        let out = render(
            &Registry::new(),
            context(12, 0, true),
            "**bold words running past the edge**\n",
        );
        for line in out.lines() {
            assert!(line.ends_with(RESET), "unterminated style in {line:?}");
        }
    }

    #[test]
    fn test_declining_hook_is_invisible() {
        let input = "```python\nprint(1)\n```\n\n```\nraw\n";
        let mut registry = Registry::new();
        registry.register("decline", |ctx| {
            ctx.hook(Hook::render_code(|_, _| Ok(HookOutcome::NotHandled)));
            Ok(())
        });
        registry.init_plugins();

        for color in [true, false] {
            let ctx = context(80, 1, color);
            assert_eq!(render(&registry, ctx, input), render(&Registry::new(), ctx, input));
        }
    }

    #[test]
    fn test_handled_code_is_emitted_verbatim() {
        let mut registry = Registry::new();
        registry.register("boxed", |ctx| {
            ctx.hook(Hook::render_code(|event, hook| match event {
                CodeEvent::Start { lang } => Ok(HookOutcome::Handled(format!(
                    "┌ {}\n│",
                    lang.unwrap_or("text")
                ))),
                CodeEvent::Line { raw, .. } => Ok(HookOutcome::Handled(format!(
                    "│ {}",
                    hook.palette().paint(tokens::SYNTAX_KEYWORD, raw)
                ))),
                CodeEvent::End { .. } => Err(ChromaError::plugin(hook.plugin(), "no footer")),
            }));
            Ok(())
        });
        registry.init_plugins();

        let out = render(&registry, context(80, 1, false), "```sh\nls\n```\n");
        assert_eq!(out, "\n ┌ sh\n │\n │ ls\n ```\n");

        let out = render(&registry, context(80, 0, true), "```sh\nls\n```\n");
        assert!(out.contains("\x1b["));
    }

    #[test]
    fn test_transforms_run_before_inline_parsing() {
        let mut registry = Registry::new();
        registry.register("stars", |ctx| {
            ctx.hook(Hook::transform_content(|text, _| Ok(text.replace("!!", "**"))));
            Ok(())
        });
        registry.init_plugins();

        let out = render(&registry, context(80, 0, true), "very !!loud!! text\n```\n!!code!!\n```\n");
        let bold = builtin_style(tokens::BOLD).unwrap().escape();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("very {bold}loud{RESET} text"));
        // Code lines are never transformed
        assert!(lines[2].contains("!!code!!"));
    }

    #[test]
    fn test_builtin_plugins() {
        let mut registry = Registry::new();
        register_builtins(&mut registry);
        registry.init_plugins();

        let out = render(&registry, context(80, 0, false), "done :check:\n```rust\nlet x = 1;\n```\n");
        assert_eq!(out, "done ✓\n```rust\n  let x = 1;\n```\n");

        let out = render(&registry, context(80, 0, true), "```rust\nlet x = 1;\n```\n");
        let keyword = builtin_style(tokens::SYNTAX_KEYWORD).unwrap().escape();
        assert!(out.contains(&format!("{keyword}let{RESET}")));
    }
}
