//! Legacy single-byte code pages
//!
//! Used for the best-effort fallback byte written after each code point
//! escape, for readers that do not understand code point escapes.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A single-byte character set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodePage {
    /// ISO-8859-1
    #[default]
    Latin1,
    /// ISO-8859-15
    Latin9,
    /// Windows-1252
    Windows1252,
    /// US-ASCII
    Ascii,
}

/// Windows-1252 assignments in 0x80..=0x9F; `None` slots are unassigned
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// ISO-8859-15 replacements of ISO-8859-1 positions
const LATIN9_DIFF: [(u8, char); 8] = [
    (0xA4, '\u{20AC}'),
    (0xA6, '\u{0160}'),
    (0xA8, '\u{0161}'),
    (0xB4, '\u{017D}'),
    (0xB8, '\u{017E}'),
    (0xBC, '\u{0152}'),
    (0xBD, '\u{0153}'),
    (0xBE, '\u{0178}'),
];

impl CodePage {
    /// Encode one character, or `None` if the page has no byte for it
    pub fn encode(self, c: char) -> Option<u8> {
        let cp = c as u32;
        if cp < 0x80 {
            return Some(cp as u8);
        }
        match self {
            CodePage::Ascii => None,
            CodePage::Latin1 => u8::try_from(cp).ok(),
            CodePage::Latin9 => {
                if let Some(&(byte, _)) = LATIN9_DIFF.iter().find(|(_, ch)| *ch == c) {
                    return Some(byte);
                }
                let byte = u8::try_from(cp).ok()?;
                if LATIN9_DIFF.iter().any(|(b, _)| *b == byte) {
                    None
                } else {
                    Some(byte)
                }
            }
            CodePage::Windows1252 => {
                if let Some(i) = CP1252_HIGH.iter().position(|slot| *slot == Some(c)) {
                    return Some(0x80 + i as u8);
                }
                match cp {
                    0xA0..=0xFF => Some(cp as u8),
                    _ => None,
                }
            }
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            CodePage::Latin1 => "iso-8859-1",
            CodePage::Latin9 => "iso-8859-15",
            CodePage::Windows1252 => "windows-1252",
            CodePage::Ascii => "us-ascii",
        }
    }
}

impl FromStr for CodePage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(CodePage::Latin1),
            "latin-9" | "latin9" | "iso-8859-15" | "iso8859-15" => Ok(CodePage::Latin9),
            "cp1252" | "windows-1252" => Ok(CodePage::Windows1252),
            "ascii" | "us-ascii" => Ok(CodePage::Ascii),
            _ => Err(ConfigError::UnknownCodePage(s.to_string())),
        }
    }
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
