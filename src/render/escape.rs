//! RTF text escaping
//!
//! Backslash and braces are the RTF metacharacters. Line breaks become
//! `\par` followed by a real newline. Characters above 7-bit ASCII are
//! written as `\ud{\uN<fallback>}`: the UTF-16 unit as a signed 16-bit
//! decimal, then one byte from the legacy code page (hex-escaped above
//! 0x7F, `?` when the page has no byte for the character). Characters
//! outside the Basic Multilingual Plane get one `\uN<fallback>` per
//! surrogate.

use std::fmt::Write;

use super::codepage::CodePage;

/// Escapes text for an RTF body or font table
#[derive(Debug, Clone, Copy, Default)]
pub struct Escaper {
    pub code_page: CodePage,
    /// Write non-ASCII characters as-is instead of escaping them
    pub unicode_output: bool,
}

impl Escaper {
    pub fn new(code_page: CodePage, unicode_output: bool) -> Self {
        Self {
            code_page,
            unicode_output,
        }
    }

    /// Escape `text`, appending to `out`
    pub fn escape_into(&self, text: &str, out: &mut String) {
        for c in text.chars() {
            match c {
                // The escape character goes first so nothing added
                // here is escaped twice
                '\\' => out.push_str("\\\\"),
                '{' => out.push_str("\\{"),
                '}' => out.push_str("\\}"),
                '\n' => out.push_str("\\par\n"),
                c if c.is_ascii() || self.unicode_output => out.push(c),
                c => self.push_code_point(c, out),
            }
        }
    }

    /// Escape `text` into a new string
    pub fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.escape_into(text, &mut out);
        out
    }

    fn push_code_point(&self, c: char, out: &mut String) {
        let mut units = [0u16; 2];
        out.push_str("\\ud{");
        for &unit in c.encode_utf16(&mut units).iter() {
            // Writing to a String cannot fail
            let _ = write!(out, "\\u{}", unit as i16);
            self.push_fallback(c, out);
        }
        out.push('}');
    }

    fn push_fallback(&self, c: char, out: &mut String) {
        match self.code_page.encode(c) {
            Some(byte) if byte > 0x7F => {
                let _ = write!(out, "\\'{:02x}", byte);
            }
            Some(byte) => self.escape_into(&char::from(byte).to_string(), out),
            None => out.push('?'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin1() -> Escaper {
        Escaper::new(CodePage::Latin1, false)
    }

    #[test]
    fn test_metacharacters() {
        assert_eq!(latin1().escape(r"a\b{c}"), r"a\\b\{c\}");
        assert_eq!(latin1().escape(r"\{"), r"\\\{");
        assert_eq!(latin1().escape(""), "");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(latin1().escape("a\nb"), "a\\par\nb");
        assert_eq!(latin1().escape("\n\n"), "\\par\n\\par\n");
    }

    #[test]
    fn test_unrepresentable_falls_back_to_question_mark() {
        assert_eq!(latin1().escape("€"), r"\ud{\u8364?}");
        assert_eq!(latin1().escape("中"), r"\ud{\u20013?}");
    }

    #[test]
    fn test_high_fallback_byte_is_hex_escaped() {
        assert_eq!(latin1().escape("é"), r"\ud{\u233\'e9}");
        let latin9 = Escaper::new(CodePage::Latin9, false);
        assert_eq!(latin9.escape("€"), r"\ud{\u8364\'a4}");
        let ascii = Escaper::new(CodePage::Ascii, false);
        assert_eq!(ascii.escape("é"), r"\ud{\u233?}");
    }

    #[test]
    fn test_unicode_output_bypasses_code_points() {
        let escaper = Escaper::new(CodePage::Latin1, true);
        assert_eq!(escaper.escape("{€}\n"), "\\{€\\}\\par\n");
    }

    #[test]
    fn test_code_points_are_signed_sixteen_bit() {
        assert_eq!(latin1().escape("\u{7fff}"), r"\ud{\u32767?}");
        assert_eq!(latin1().escape("가"), r"\ud{\u-21504?}");
        assert_eq!(latin1().escape("\u{ffff}"), r"\ud{\u-1?}");
    }

    #[test]
    fn test_astral_characters_use_surrogate_pairs() {
        // U+1F600 is D83D DE00 in UTF-16
        assert_eq!(latin1().escape("😀"), r"\ud{\u-10179?\u-8704?}");
    }

    #[test]
    fn test_seven_bit_boundary() {
        assert_eq!(latin1().escape("\u{7f}"), "\u{7f}");
        assert_eq!(latin1().escape("\u{80}"), r"\ud{\u128\'80}");
    }
}
