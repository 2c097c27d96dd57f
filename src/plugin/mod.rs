//! Plugins, hooks and plugin configuration
//!
//! A `Registry` owns every registered plugin, the handlers they attached
//! and the `ConfigStore` holding their options. It is mutated while the
//! program sets up and only read while documents render.

pub mod builtin;
mod config;
mod hooks;
mod registry;

pub use builtin::register_builtins;
pub use config::{parse_flag, ConfigEntry, ConfigStore};
pub use hooks::{CodeEvent, Hook, HookContext, HookOutcome, HookPoint};
pub use registry::{PluginContext, PluginInfo, PluginStatus, Registry, ENABLED_KEY};
