//! Language lookup by fence tag
//!
//! The `SyntaxSet` owns every language definition and maps fence tags
//! (the word after the opening fence) to them.

use std::collections::HashMap;

use super::builtin;
use super::language::LanguageDefinition;

/// Collection of languages addressable by alias
#[derive(Default)]
pub struct SyntaxSet {
    /// Loaded language definitions
    languages: Vec<LanguageDefinition>,
    /// Lowercase alias to index in `languages`
    alias_map: HashMap<String, usize>,
}

impl SyntaxSet {
    /// Create a syntax set with the built-in languages
    pub fn builtin() -> Self {
        let mut set = Self::default();
        for lang in builtin::all_languages() {
            set.add_language(lang);
        }
        set
    }

    /// Add a language definition; later aliases shadow earlier ones
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let index = self.languages.len();
        self.alias_map.insert(lang.name.to_lowercase(), index);
        for alias in &lang.aliases {
            self.alias_map.insert(alias.clone(), index);
        }
        self.languages.push(lang);
    }

    /// Look up a language by fence tag, case-insensitively
    pub fn find(&self, tag: &str) -> Option<&LanguageDefinition> {
        let index = *self.alias_map.get(&tag.to_lowercase())?;
        self.languages.get(index)
    }

    /// List available languages
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.iter().map(|l| l.name.as_str()).collect();
        names.sort();
        names
    }
}
