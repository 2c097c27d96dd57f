//! chroma - Markdown rendering for the terminal
//!
//! Documents are rendered one line at a time: each line is classified,
//! offered to plugin hooks, and otherwise styled through semantic tokens
//! that a theme maps to colors.

pub mod config;
pub mod error;
pub mod markdown;
pub mod plugin;
pub mod render;
pub mod syntax;
pub mod terminal;
pub mod theme;

pub use error::{ChromaError, Result};
pub use plugin::Registry;
pub use render::{RenderContext, RenderOptions, Renderer};
