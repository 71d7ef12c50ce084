//! rtflex - regex-driven lexical highlighting rendered as RTF
//!
//! Text is classified by a stack-based tokenizer running a validated
//! [`PatternTable`], and the resulting token stream is rendered as a Rich
//! Text Format document styled through a [`StyleSheet`].
//!
//! ```no_run
//! use rtflex::{brainfuck_language, RenderOptions, RtfRenderer, StyleSheet, TokenTypes};
//!
//! let table = brainfuck_language().compile()?;
//! let sheet = StyleSheet::default_sheet();
//! let renderer = RtfRenderer::new(TokenTypes::standard(), &sheet, RenderOptions::default());
//! let _rtf = renderer.render_to_string(table.tokens("+[>.<-]"));
//! # Ok::<(), rtflex::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

use std::io::{self, Write};

pub use config::RenderOptions;
pub use error::{ConfigError, Error, Result};
pub use render::{CodePage, ColorTable, Escaper, RtfRenderer};
pub use syntax::{
    all_languages, brainfuck_language, standard, words, Action, Color, LanguageDefinition,
    LanguageRegistry, PatternTable, Style, StyleSheet, Token, TokenType, TokenTypes,
    TokenTypesBuilder, Tokens,
};

/// Tokenize `text` with `table` and render it straight to `out`, without
/// holding the token list in memory.
pub fn highlight<W: Write + ?Sized>(
    text: &str,
    table: &PatternTable,
    types: &TokenTypes,
    sheet: &StyleSheet,
    options: &RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    RtfRenderer::new(types, sheet, options.clone()).render(table.tokens(text), out)
}
