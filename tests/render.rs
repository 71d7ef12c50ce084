use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rtflex::{
    brainfuck_language, highlight, standard::*, CodePage, Color, ColorTable, RenderOptions,
    RtfRenderer, Style, StyleSheet, Token, TokenTypes,
};

const EMPTY_HEADER: &str =
    r"{\rtf1\ansi\deff0{\fonttbl{\f0\fmodern\fprq1\fcharset0;}}{\colortbl;}\f0";

/// Body of a document rendered with an empty style sheet
fn plain_body(text: &str, options: RenderOptions) -> String {
    let sheet = StyleSheet::new("plain");
    let renderer = RtfRenderer::new(TokenTypes::standard(), &sheet, options);
    let out = renderer.render_to_string(vec![Token::new(TEXT, text)]);
    out.strip_prefix(EMPTY_HEADER)
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::to_string)
        .unwrap_or_else(|| panic!("unexpected document shape: {out}"))
}

#[test]
fn escapes_backslash_and_braces() {
    assert_eq!(plain_body(r"a\b{c}", RenderOptions::default()), r"a\\b\{c\}");
}

#[test]
fn line_break_becomes_par_and_newline() {
    assert_eq!(plain_body("one\ntwo", RenderOptions::default()), "one\\par\ntwo");
}

#[test]
fn euro_under_latin1_falls_back_to_question_mark() {
    assert_eq!(plain_body("€", RenderOptions::default()), r"\ud{\u8364?}");
}

#[test]
fn euro_under_latin9_uses_hex_byte() {
    let options = RenderOptions {
        code_page: CodePage::Latin9,
        ..Default::default()
    };
    assert_eq!(plain_body("5€", options), r"5\ud{\u8364\'a4}");
}

#[test]
fn unicode_output_writes_characters_directly() {
    let options = RenderOptions {
        unicode_output: true,
        ..Default::default()
    };
    assert_eq!(plain_body("ünï{}", options), r"ünï\{\}");
}

#[test]
fn full_brainfuck_document() {
    let types = TokenTypes::standard();
    let mut sheet = StyleSheet::new("test");
    sheet.set(KEYWORD, Style::parse("bold #008000").unwrap());
    sheet.set(NAME_BUILTIN, Style::parse("#ff0000").unwrap());
    sheet.set(ERROR, Style::parse("border:#ff0000 bg:#ffffff").unwrap());

    let options = RenderOptions {
        font_face: "Courier New".to_string(),
        ..Default::default()
    };
    let table = brainfuck_language().compile().unwrap();
    let mut out = Vec::new();
    highlight("+[x]]\n", &table, types, &sheet, &options, &mut out).unwrap();

    let expected = concat!(
        r"{\rtf1\ansi\deff0{\fonttbl{\f0\fmodern\fprq1\fcharset0 Courier New;}}",
        r"{\colortbl;\red0\green128\blue0;\red255\green0\blue0;\red255\green255\blue255;}\f0",
        r"{\cf2 +}{\cf1\b [}x{\cf1\b ]}{\cb3\chbrdr\chcfpat2 ]}\par",
        "\n}",
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn unstyled_type_falls_back_to_ancestor() {
    let types = TokenTypes::standard();
    let mut sheet = StyleSheet::new("test");
    sheet.set(KEYWORD, Style::fg(Color::rgb(0, 0, 255)));
    let renderer = RtfRenderer::new(types, &sheet, RenderOptions::default());

    let out = renderer.render_to_string(vec![
        Token::new(KEYWORD_TYPE, "int"),
        Token::new(NAME, " x"),
    ]);
    assert!(out.ends_with(r"}\f0{\cf1 int} x}"), "{out}");
}

#[test]
fn color_table_is_stable_across_renders() {
    let sheet = StyleSheet::default_sheet();
    let first = ColorTable::from_style_sheet(&sheet);
    let second = ColorTable::from_style_sheet(&sheet);
    assert_eq!(
        first.iter().collect::<Vec<_>>(),
        second.iter().collect::<Vec<_>>()
    );

    let renderer = RtfRenderer::new(TokenTypes::standard(), &sheet, RenderOptions::default());
    let tokens = || vec![Token::new(COMMENT, "# hi"), Token::new(ERROR, "?")];
    assert_eq!(renderer.render_to_vec(tokens()), renderer.render_to_vec(tokens()));
}

#[test]
fn styled_colors_come_from_the_sheet_not_the_tokens() {
    let mut sheet = StyleSheet::new("test");
    sheet.set(COMMENT, Style::fg(Color::rgb(1, 2, 3)));
    sheet.set(KEYWORD, Style::fg(Color::rgb(4, 5, 6)));
    let renderer = RtfRenderer::new(TokenTypes::standard(), &sheet, RenderOptions::default());

    // Only keywords in the stream, but both colors are declared
    let out = renderer.render_to_string(vec![Token::new(KEYWORD, "if")]);
    assert!(out.contains(r"{\colortbl;\red1\green2\blue3;\red4\green5\blue6;}"));
    assert!(out.contains(r"{\cf2 if}"));
}

proptest! {
    #[test]
    fn ascii_output_without_unicode_flag(text in "\\PC*") {
        let table = brainfuck_language().compile().unwrap();
        let sheet = StyleSheet::default_sheet();
        let renderer = RtfRenderer::new(TokenTypes::standard(), &sheet, RenderOptions::default());
        let out = renderer.render_to_vec(table.tokens(&text));
        prop_assert!(out.is_ascii());
        prop_assert_eq!(out.last(), Some(&b'}'));
    }
}
