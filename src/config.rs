//! Renderer configuration
//!
//! Options can be built in code or loaded from a TOML file.
//!
//! Example:
//! ```text
//! # rtflex render options
//! font-face = "Courier New"
//! code-page = "iso-8859-15"
//! unicode-output = false
//! ```

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::render::CodePage;

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Font name written to the font table; empty keeps the generic face
    pub font_face: String,
    /// Code page for the fallback byte after each code point escape
    pub code_page: CodePage,
    /// Write non-ASCII characters unescaped, for outputs whose encoding
    /// already covers them
    pub unicode_output: bool,
}

impl RenderOptions {
    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse options from TOML text. Unknown keys are ignored.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: toml::Table = contents.parse()?;
        let mut options = RenderOptions::default();
        options.apply(&settings)?;
        Ok(options)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, settings: &toml::Table) -> std::result::Result<(), ConfigError> {
        if let Some(value) = settings.get("font-face") {
            self.font_face = expect_str("font-face", value)?.to_string();
        }

        if let Some(value) = settings.get("code-page") {
            let name = expect_str("code-page", value)?;
            // Unicode encodings cannot act as a single-byte fallback
            if !is_unicode_encoding(name) {
                self.code_page = name.parse()?;
            }
        }

        if let Some(value) = settings.get("unicode-output") {
            self.unicode_output = value.as_bool().ok_or_else(|| ConfigError::InvalidOption {
                key: "unicode-output".to_string(),
                message: "expected a boolean".to_string(),
            })?;
        }

        Ok(())
    }
}

fn expect_str<'a>(key: &str, value: &'a toml::Value) -> std::result::Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| ConfigError::InvalidOption {
        key: key.to_string(),
        message: "expected a string".to_string(),
    })
}

fn is_unicode_encoding(name: &str) -> bool {
    let name = name.trim().to_lowercase().replace('_', "-");
    matches!(
        name.as_str(),
        "utf-8" | "utf8" | "utf-16" | "utf16" | "utf-32" | "utf32"
    )
}
