//! Rich Text Format rendering
//!
//! The renderer consumes a token stream once and writes a self-contained
//! RTF document: header with font table, color table built from the style
//! sheet, then the body. Only tokens whose resolved style sets something
//! are wrapped in a group; everything else is written as bare text.

mod codepage;
mod color_table;
mod escape;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::config::RenderOptions;
use crate::syntax::{Style, StyleSheet, Token, TokenType, TokenTypes};

pub use codepage::CodePage;
pub use color_table::ColorTable;
pub use escape::Escaper;

/// Renders token streams as RTF
#[derive(Debug, Clone)]
pub struct RtfRenderer<'s> {
    types: &'s TokenTypes,
    sheet: &'s StyleSheet,
    options: RenderOptions,
}

impl<'s> RtfRenderer<'s> {
    /// Create a renderer; `types` must be the tree the tokens and sheet use
    pub fn new(types: &'s TokenTypes, sheet: &'s StyleSheet, options: RenderOptions) -> Self {
        Self {
            types,
            sheet,
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Write the document for `tokens` to `out`.
    ///
    /// Errors come only from `out` and are returned unchanged.
    pub fn render<'t, I, W>(&self, tokens: I, out: &mut W) -> io::Result<()>
    where
        I: IntoIterator<Item = Token<'t>>,
        W: Write + ?Sized,
    {
        let colors = ColorTable::from_style_sheet(self.sheet);
        let escaper = Escaper::new(self.options.code_page, self.options.unicode_output);

        out.write_all(self.header(&colors, &escaper).as_bytes())?;

        // Control words per resolved type, computed once per render
        let mut controls: HashMap<TokenType, String> = HashMap::new();
        let mut buf = String::new();
        for token in tokens {
            let start = controls.entry(token.token_type).or_insert_with(|| {
                control_words(self.sheet.resolve(self.types, token.token_type), &colors)
            });
            buf.clear();
            if start.is_empty() {
                escaper.escape_into(token.text, &mut buf);
            } else {
                buf.push('{');
                buf.push_str(start);
                buf.push(' ');
                escaper.escape_into(token.text, &mut buf);
                buf.push('}');
            }
            out.write_all(buf.as_bytes())?;
        }

        out.write_all(b"}")
    }

    /// Render into a byte buffer
    pub fn render_to_vec<'t, I>(&self, tokens: I) -> Vec<u8>
    where
        I: IntoIterator<Item = Token<'t>>,
    {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.render(tokens, &mut out);
        out
    }

    /// Render into a string
    pub fn render_to_string<'t, I>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = Token<'t>>,
    {
        // Escaped output is ASCII, or UTF-8 when code points pass through
        String::from_utf8_lossy(&self.render_to_vec(tokens)).into_owned()
    }

    /// Document header up to and including the body font selection
    fn header(&self, colors: &ColorTable, escaper: &Escaper) -> String {
        let mut header = String::from(r"{\rtf1\ansi\deff0{\fonttbl{\f0\fmodern\fprq1\fcharset0");
        if !self.options.font_face.is_empty() {
            header.push(' ');
            escaper.escape_into(&self.options.font_face, &mut header);
        }
        header.push_str(r";}}{\colortbl;");
        for (_, color) in colors.iter() {
            let _ = write!(
                header,
                r"\red{}\green{}\blue{};",
                color.r, color.g, color.b
            );
        }
        header.push_str(r"}\f0");
        header
    }
}

/// RTF control words for a style; empty for the default style
fn control_words(style: &Style, colors: &ColorTable) -> String {
    let mut buf = String::new();
    if let Some(id) = style.bgcolor.and_then(|c| colors.id(c)) {
        let _ = write!(buf, r"\cb{}", id);
    }
    if let Some(id) = style.color.and_then(|c| colors.id(c)) {
        let _ = write!(buf, r"\cf{}", id);
    }
    if style.bold {
        buf.push_str(r"\b");
    }
    if style.italic {
        buf.push_str(r"\i");
    }
    if style.underline {
        buf.push_str(r"\ul");
    }
    if let Some(id) = style.border.and_then(|c| colors.id(c)) {
        let _ = write!(buf, r"\chbrdr\chcfpat{}", id);
    }
    buf
}
