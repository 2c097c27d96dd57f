//! Plugins shipped with chroma
//!
//! - `highlight` colors fenced code by language
//! - `emoji` expands `:shortcode:` names in prose

pub mod emoji;
pub mod highlight;

use super::registry::Registry;

/// Register every built-in plugin, in a fixed order
pub fn register_builtins(registry: &mut Registry) {
    highlight::register(registry);
    emoji::register(registry);
}
