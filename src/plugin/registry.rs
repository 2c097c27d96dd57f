//! Plugin registry and hook dispatch
//!
//! Plugins are registered by name with an initializer. Initializers run
//! once, in registration order, and use a `PluginContext` to declare
//! options and attach hooks. Hooks from an initializer that fails are
//! dropped along with the plugin.
//!
//! Dispatch never fails: a handler that errors or panics is logged and
//! treated as if it had declined.

use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};

use super::config::ConfigStore;
use super::hooks::{CodeEvent, Hook, HookContext, HookOutcome, HookPoint, RenderCodeFn, TransformFn};
use crate::error::{ChromaError, Result};
use crate::theme::Palette;

/// Config key every plugin honors
pub const ENABLED_KEY: &str = "enabled";

type InitFn = Box<dyn FnOnce(&mut PluginContext<'_>) -> Result<()> + Send + Sync>;

/// Lifecycle of a registered plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    /// Registered, initializer not run yet
    Pending,
    /// Initialized, hooks active
    Ready,
    /// Initializer failed; the plugin contributes nothing
    Failed,
}

/// Summary of a registered plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub status: PluginStatus,
    pub hooks: Vec<HookPoint>,
}

struct PluginEntry {
    name: String,
    init: Option<InitFn>,
    status: PluginStatus,
}

struct Handler<F: ?Sized> {
    plugin: String,
    func: Box<F>,
}

/// Handed to a plugin initializer
pub struct PluginContext<'a> {
    plugin: &'a str,
    config: &'a mut ConfigStore,
    hooks: Vec<Hook>,
}

impl<'a> PluginContext<'a> {
    /// Name the plugin was registered under
    pub fn name(&self) -> &str {
        self.plugin
    }

    /// Declare an option owned by this plugin
    pub fn declare_config(&mut self, key: &str, default: &str, description: &str) {
        self.config.declare(self.plugin, key, default, description);
    }

    /// Current value of one of this plugin's options
    pub fn config(&self, key: &str) -> &str {
        self.config.get(self.plugin, key)
    }

    /// Attach a handler to a hook point
    pub fn hook(&mut self, hook: Hook) {
        self.hooks.push(hook);
    }
}

/// Registered plugins, their hooks, and their configuration
#[derive(Default)]
pub struct Registry {
    plugins: Vec<PluginEntry>,
    render_code: Vec<Handler<RenderCodeFn>>,
    transform_content: Vec<Handler<TransformFn>>,
    config: ConfigStore,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    ///
    /// Returns false, with a warning, if the name is already taken.
    pub fn register<F>(&mut self, name: &str, init: F) -> bool
    where
        F: FnOnce(&mut PluginContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        if self.plugins.iter().any(|p| p.name == name) {
            warn!("plugin '{name}' is already registered, ignoring");
            return false;
        }
        self.plugins.push(PluginEntry {
            name: name.to_string(),
            init: Some(Box::new(init)),
            status: PluginStatus::Pending,
        });
        true
    }

    /// Run pending initializers in registration order
    ///
    /// Returns the number of plugins that became ready.
    pub fn init_plugins(&mut self) -> usize {
        let mut ready = 0;
        for index in 0..self.plugins.len() {
            let Some(init) = self.plugins[index].init.take() else {
                continue;
            };
            let name = self.plugins[index].name.clone();

            let mut ctx = PluginContext {
                plugin: &name,
                config: &mut self.config,
                hooks: Vec::new(),
            };
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| init(&mut ctx)))
                .unwrap_or_else(|payload| Err(ChromaError::plugin(&name, panic_message(&*payload))));
            let hooks = ctx.hooks;

            match outcome {
                Ok(()) => {
                    debug!("plugin '{name}' ready with {} hook(s)", hooks.len());
                    for hook in hooks {
                        self.attach(&name, hook);
                    }
                    self.plugins[index].status = PluginStatus::Ready;
                    ready += 1;
                }
                Err(e) => {
                    warn!("plugin '{name}' failed to initialize: {e}");
                    self.plugins[index].status = PluginStatus::Failed;
                }
            }
        }
        ready
    }

    fn attach(&mut self, plugin: &str, hook: Hook) {
        let plugin = plugin.to_string();
        match hook {
            Hook::RenderCode(func) => self.render_code.push(Handler { plugin, func }),
            Hook::TransformContent(func) => self.transform_content.push(Handler { plugin, func }),
        }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// Registered plugins in registration order
    pub fn plugins(&self) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .map(|p| {
                let mut hooks = Vec::new();
                if self.render_code.iter().any(|h| h.plugin == p.name) {
                    hooks.push(HookPoint::RenderCode);
                }
                if self.transform_content.iter().any(|h| h.plugin == p.name) {
                    hooks.push(HookPoint::TransformContent);
                }
                PluginInfo {
                    name: p.name.clone(),
                    status: p.status,
                    hooks,
                }
            })
            .collect()
    }

    /// True if any handler is attached to `point`
    pub fn has_hooks(&self, point: HookPoint) -> bool {
        match point {
            HookPoint::RenderCode => !self.render_code.is_empty(),
            HookPoint::TransformContent => !self.transform_content.is_empty(),
        }
    }

    fn is_enabled(&self, plugin: &str) -> bool {
        self.config.get_bool(plugin, ENABLED_KEY, true)
    }

    /// Offer a code line to `RenderCode` handlers
    ///
    /// Returns the output of the first handler that handles it.
    pub fn dispatch_render_code(
        &self,
        event: &CodeEvent<'_>,
        palette: Palette<'_>,
        width: usize,
    ) -> Option<String> {
        for handler in &self.render_code {
            if !self.is_enabled(&handler.plugin) {
                continue;
            }
            let ctx = HookContext::new(&handler.plugin, &self.config, palette, width);
            match guarded(&handler.plugin, || (handler.func)(event, &ctx)) {
                Ok(HookOutcome::Handled(output)) => return Some(output),
                Ok(HookOutcome::NotHandled) => {}
                Err(e) => warn!("{} hook of '{}' failed: {e}", HookPoint::RenderCode, handler.plugin),
            }
        }
        None
    }

    /// Run text through every enabled `TransformContent` handler in order
    ///
    /// A failing handler leaves the text as it received it.
    pub fn apply_transforms<'t>(&self, text: &'t str, palette: Palette<'_>, width: usize) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);
        for handler in &self.transform_content {
            if !self.is_enabled(&handler.plugin) {
                continue;
            }
            let ctx = HookContext::new(&handler.plugin, &self.config, palette, width);
            match guarded(&handler.plugin, || (handler.func)(&current, &ctx)) {
                Ok(next) => {
                    if next != *current {
                        current = Cow::Owned(next);
                    }
                }
                Err(e) => warn!(
                    "{} hook of '{}' failed: {e}",
                    HookPoint::TransformContent,
                    handler.plugin
                ),
            }
        }
        current
    }
}

/// Run a handler, turning a panic into an error
fn guarded<T>(plugin: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(ChromaError::plugin(plugin, panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn line(raw: &str) -> CodeEvent<'_> {
        CodeEvent::Line { raw, lang: Some("sh") }
    }

    fn dispatch(registry: &Registry, raw: &str) -> Option<String> {
        registry.dispatch_render_code(&line(raw), Palette::plain(), 80)
    }

    fn transform(registry: &Registry, text: &str) -> String {
        registry.apply_transforms(text, Palette::plain(), 80).into_owned()
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut registry = Registry::new();
        assert!(registry.register("dup", |_| Ok(())));
        assert!(!registry.register("dup", |_| Err(ChromaError::Message("second".into()))));

        assert_eq!(registry.init_plugins(), 1);
        let plugins = registry.plugins();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].status, PluginStatus::Ready);
    }

    #[test]
    fn test_init_runs_once_in_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = Registry::new();
        for name in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.register(name, move |ctx| {
                order.lock().unwrap().push(ctx.name().to_string());
                Ok(())
            });
        }

        assert_eq!(registry.init_plugins(), 3);
        assert_eq!(registry.init_plugins(), 0);
        assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
    }

    #[test]
    fn test_declare_config_during_init() {
        let mut registry = Registry::new();
        registry.register("fancy", |ctx| {
            ctx.declare_config("enabled", "true", "Turn fancy on");
            ctx.declare_config("style", "bold", "How fancy");
            assert_eq!(ctx.config("style"), "bold");
            Ok(())
        });
        registry.init_plugins();

        assert_eq!(registry.config().get("fancy", "style"), "bold");
        assert_eq!(registry.config().plugin_entries("fancy").count(), 2);
    }

    #[test]
    fn test_failed_init_drops_hooks() {
        let mut registry = Registry::new();
        registry.register("broken", |ctx| {
            ctx.hook(Hook::render_code(|_, _| Ok(HookOutcome::Handled("broken".into()))));
            Err(ChromaError::Message("no backend".into()))
        });
        registry.register("panicky", |_| panic!("boom"));
        registry.register("fine", |ctx| {
            ctx.hook(Hook::render_code(|_, _| Ok(HookOutcome::Handled("fine".into()))));
            Ok(())
        });

        assert_eq!(registry.init_plugins(), 1);
        let statuses: Vec<_> = registry.plugins().into_iter().map(|p| p.status).collect();
        assert_eq!(statuses, [PluginStatus::Failed, PluginStatus::Failed, PluginStatus::Ready]);
        assert_eq!(dispatch(&registry, "x").as_deref(), Some("fine"));
    }

    #[test]
    fn test_dispatch_stops_at_first_handled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();

        let counter = Arc::clone(&calls);
        registry.register("decliner", move |ctx| {
            ctx.hook(Hook::render_code(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(HookOutcome::NotHandled)
            }));
            Ok(())
        });
        registry.register("taker", |ctx| {
            ctx.hook(Hook::render_code(|event, _| match event {
                CodeEvent::Line { raw, .. } => Ok(HookOutcome::Handled(raw.to_uppercase())),
                _ => Ok(HookOutcome::NotHandled),
            }));
            Ok(())
        });
        let counter = Arc::clone(&calls);
        registry.register("never", move |ctx| {
            ctx.hook(Hook::render_code(move |_, _| {
                counter.fetch_add(100, Ordering::SeqCst);
                Ok(HookOutcome::NotHandled)
            }));
            Ok(())
        });
        registry.init_plugins();

        assert_eq!(dispatch(&registry, "echo hi").as_deref(), Some("ECHO HI"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_errors_fall_through() {
        let mut registry = Registry::new();
        registry.register("erring", |ctx| {
            ctx.hook(Hook::render_code(|_, ctx| {
                Err(ChromaError::plugin(ctx.plugin(), "lexer exploded"))
            }));
            Ok(())
        });
        registry.register("panicking", |ctx| {
            ctx.hook(Hook::render_code(|_, _| panic!("handler bug")));
            Ok(())
        });
        registry.init_plugins();

        assert_eq!(dispatch(&registry, "x"), None);
    }

    #[test]
    fn test_no_handlers() {
        let registry = Registry::new();
        assert!(!registry.has_hooks(HookPoint::RenderCode));
        assert_eq!(dispatch(&registry, "x"), None);
        assert_eq!(transform(&registry, "same"), "same");
    }

    #[test]
    fn test_transforms_chain_and_respect_enabled() {
        let mut registry = Registry::new();
        registry.register("upper", |ctx| {
            ctx.declare_config(ENABLED_KEY, "true", "Uppercase everything");
            ctx.hook(Hook::transform_content(|text, _| Ok(text.to_uppercase())));
            Ok(())
        });
        registry.register("exclaim", |ctx| {
            ctx.declare_config(ENABLED_KEY, "true", "Add emphasis");
            ctx.hook(Hook::transform_content(|text, _| Ok(format!("{text}!"))));
            Ok(())
        });
        registry.register("fails", |ctx| {
            ctx.hook(Hook::transform_content(|_, _| Err(ChromaError::Message("nope".into()))));
            Ok(())
        });
        registry.init_plugins();
        assert!(registry.has_hooks(HookPoint::TransformContent));

        assert_eq!(transform(&registry, "hi"), "HI!");

        registry.config_mut().set("upper", ENABLED_KEY, "false");
        assert_eq!(transform(&registry, "hi"), "hi!");

        registry.config_mut().set("exclaim", ENABLED_KEY, "no");
        assert_eq!(transform(&registry, "hi"), "hi");
    }

    #[test]
    fn test_plugin_info_lists_hooks() {
        let mut registry = Registry::new();
        registry.register("both", |ctx| {
            ctx.hook(Hook::transform_content(|text, _| Ok(text.to_string())));
            ctx.hook(Hook::render_code(|_, _| Ok(HookOutcome::NotHandled)));
            Ok(())
        });
        registry.register("later", |_| Ok(()));
        registry.init_plugins();
        registry.register("pending", |_| Ok(()));

        assert_eq!(
            registry.plugins(),
            vec![
                PluginInfo {
                    name: "both".into(),
                    status: PluginStatus::Ready,
                    hooks: vec![HookPoint::RenderCode, HookPoint::TransformContent],
                },
                PluginInfo {
                    name: "later".into(),
                    status: PluginStatus::Ready,
                    hooks: vec![],
                },
                PluginInfo {
                    name: "pending".into(),
                    status: PluginStatus::Pending,
                    hooks: vec![],
                },
            ]
        );
    }
}
