//! Built-in language definitions
//!
//! This module provides syntax highlighting definitions for the
//! languages most often found in fenced blocks of READMEs.

mod bash;
mod json;
mod python;
mod rust;
mod toml_lang;

use super::language::LanguageDefinition;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![
        rust::rust_language(),
        python::python_language(),
        bash::bash_language(),
        toml_lang::toml_language(),
        json::json_language(),
    ]
}
