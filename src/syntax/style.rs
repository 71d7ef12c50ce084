//! Styles and style sheets
//!
//! A [`StyleSheet`] maps token types to [`Style`]s. Lookups walk the token
//! type's ancestor chain, so a sheet only needs entries for the types it
//! wants to distinguish; anything without a styled ancestor gets the
//! default (empty) style.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, Result};

use super::tokens::{standard, TokenType, TokenTypes};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb` or `rgb`, with or without a leading `#`
    pub fn from_hex(s: &str) -> std::result::Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Visual attributes of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub color: Option<Color>,
    /// Background color
    pub bgcolor: Option<Color>,
    /// Border color
    pub border: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// Create a style with just background color
    pub fn bg(color: Color) -> Self {
        Self {
            bgcolor: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Builder: set border color
    pub fn with_border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Colors in foreground, background, border order
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        [self.color, self.bgcolor, self.border].into_iter().flatten()
    }

    /// Parse a compact style string such as `"bold #008000 bg:#ffffff"`.
    ///
    /// Words: `bold`, `italic`, `underline` and their `no` forms,
    /// `#rrggbb` / `#rgb`, `bg:<color>`, `border:<color>` (an empty color
    /// clears it). `noinherit`, `roman`, `sans` and `mono` are accepted and
    /// ignored.
    pub fn parse(spec: &str) -> std::result::Result<Self, ConfigError> {
        let mut style = Style::default();
        for word in spec.split_whitespace() {
            match word {
                "bold" => style.bold = true,
                "nobold" => style.bold = false,
                "italic" => style.italic = true,
                "noitalic" => style.italic = false,
                "underline" => style.underline = true,
                "nounderline" => style.underline = false,
                "noinherit" | "roman" | "sans" | "mono" => {}
                _ => {
                    if let Some(color) = word.strip_prefix("bg:") {
                        style.bgcolor = parse_optional_color(color)?;
                    } else if let Some(color) = word.strip_prefix("border:") {
                        style.border = parse_optional_color(color)?;
                    } else if word.starts_with('#') {
                        style.color = Some(Color::from_hex(word)?);
                    } else {
                        return Err(ConfigError::UnknownStyleAttribute(word.to_string()));
                    }
                }
            }
        }
        Ok(style)
    }
}

fn parse_optional_color(s: &str) -> std::result::Result<Option<Color>, ConfigError> {
    if s.is_empty() {
        Ok(None)
    } else {
        Color::from_hex(s).map(Some)
    }
}

static DEFAULT_STYLE: Style = Style {
    color: None,
    bgcolor: None,
    border: None,
    bold: false,
    italic: false,
    underline: false,
};

/// Ordered token type to style mapping with hierarchy fallback
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub name: String,
    entries: Vec<(TokenType, Style)>,
    index: HashMap<TokenType, usize>,
}

impl StyleSheet {
    /// Create an empty sheet
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Set the style of a type. Replacing keeps the original position.
    pub fn set(&mut self, token_type: TokenType, style: Style) -> &mut Self {
        match self.index.get(&token_type) {
            Some(&i) => self.entries[i].1 = style,
            None => {
                self.index.insert(token_type, self.entries.len());
                self.entries.push((token_type, style));
            }
        }
        self
    }

    /// Exact entry for a type, without fallback
    pub fn get(&self, token_type: TokenType) -> Option<&Style> {
        self.index.get(&token_type).map(|&i| &self.entries[i].1)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[(TokenType, Style)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Style of the nearest styled ancestor of `token_type` (itself first).
    /// Never fails; unstyled chains resolve to the default style.
    pub fn resolve(&self, types: &TokenTypes, token_type: TokenType) -> &Style {
        types
            .ancestors(token_type)
            .find_map(|ty| self.get(ty))
            .unwrap_or(&DEFAULT_STYLE)
    }

    /// Load a sheet from TOML text. Keys of the `[styles]` table are token
    /// type paths, values are style strings (see [`Style::parse`]).
    pub fn from_toml(types: &TokenTypes, source: &str) -> Result<Self> {
        let doc: toml::Table = source.parse()?;
        let name = match doc.get("name") {
            Some(toml::Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(ConfigError::InvalidOption {
                    key: "name".to_string(),
                    message: "expected a string".to_string(),
                }
                .into())
            }
            None => String::new(),
        };

        let mut sheet = StyleSheet::new(&name);
        let Some(styles) = doc.get("styles") else {
            return Ok(sheet);
        };
        let styles = styles.as_table().ok_or_else(|| ConfigError::InvalidOption {
            key: "styles".to_string(),
            message: "expected a table".to_string(),
        })?;

        for (path, value) in styles {
            let token_type = types
                .lookup(path)
                .ok_or_else(|| ConfigError::UnknownTokenType(path.clone()))?;
            let spec = value.as_str().ok_or_else(|| ConfigError::InvalidOption {
                key: format!("styles.{}", path),
                message: "expected a style string".to_string(),
            })?;
            sheet.set(token_type, Style::parse(spec)?);
        }
        Ok(sheet)
    }

    /// Load a sheet from a TOML file
    pub fn load(types: &TokenTypes, path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(types, &source)
    }

    /// A general-purpose light palette
    pub fn default_sheet() -> Self {
        use standard::*;

        let green = Color::rgb(0x00, 0x80, 0x00);
        let grey = Color::rgb(0x66, 0x66, 0x66);

        let mut sheet = StyleSheet::new("default");
        sheet.set(TEXT_WHITESPACE, Style::fg(Color::rgb(0xbb, 0xbb, 0xbb)));
        sheet.set(COMMENT, Style::fg(Color::rgb(0x40, 0x80, 0x80)).with_italic());
        sheet.set(COMMENT_PREPROC, Style::fg(Color::rgb(0xbc, 0x7a, 0x00)));
        sheet.set(KEYWORD, Style::fg(green).with_bold());
        sheet.set(KEYWORD_TYPE, Style::fg(Color::rgb(0xb0, 0x00, 0x40)));
        sheet.set(OPERATOR, Style::fg(grey));
        sheet.set(NAME_BUILTIN, Style::fg(green));
        sheet.set(NAME_FUNCTION, Style::fg(Color::rgb(0x00, 0x00, 0xff)));
        sheet.set(NAME_VARIABLE, Style::fg(Color::rgb(0x19, 0x17, 0x7c)));
        sheet.set(NAME_TAG, Style::fg(green).with_bold());
        sheet.set(NAME_DECORATOR, Style::fg(Color::rgb(0xaa, 0x22, 0xff)));
        sheet.set(LITERAL_STRING, Style::fg(Color::rgb(0xba, 0x21, 0x21)));
        sheet.set(LITERAL_NUMBER, Style::fg(grey));
        sheet.set(ERROR, Style::default().with_border(Color::rgb(0xff, 0x00, 0x00)));
        sheet
    }
}
