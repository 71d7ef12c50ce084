//! Language registry
//!
//! Holds compiled pattern tables and resolves them by name, alias, or
//! file extension.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

use super::builtin;
use super::language::{LanguageDefinition, PatternTable};

/// Compiled languages indexed for lookup
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    tables: Vec<PatternTable>,
    /// Lowercased name or alias to table index
    names: HashMap<String, usize>,
    /// Lowercased extension to table index
    extensions: HashMap<String, usize>,
}

impl LanguageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every bundled language
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for lang in builtin::all_languages() {
            registry.add_language(&lang)?;
        }
        tracing::debug!(languages = registry.tables.len(), "loaded builtin languages");
        Ok(registry)
    }

    /// Compile and add a language definition
    pub fn add_language(&mut self, lang: &LanguageDefinition) -> Result<(), ConfigError> {
        let table = lang.compile()?;
        self.add_table(table);
        Ok(())
    }

    /// Add an already compiled table. Later additions win on name clashes.
    pub fn add_table(&mut self, table: PatternTable) {
        let idx = self.tables.len();
        self.names.insert(table.name().to_lowercase(), idx);
        for alias in table.aliases() {
            self.names.insert(alias.to_lowercase(), idx);
        }
        for ext in table.extensions() {
            self.extensions.insert(ext.to_lowercase(), idx);
        }
        self.tables.push(table);
    }

    /// Find a language by name or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PatternTable> {
        self.names
            .get(&name.to_lowercase())
            .map(|&idx| &self.tables[idx])
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&PatternTable> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extensions.get(&ext).map(|&idx| &self.tables[idx])
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tables.iter().map(|t| t.name()).collect();
        names.sort();
        names
    }
}
