use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rtflex::syntax::ROOT_STATE;
use rtflex::{
    standard::*, Action, LanguageDefinition, LanguageRegistry, PatternTable, TokenType,
};

fn bracket_table() -> PatternTable {
    let mut lang = LanguageDefinition::new("Brackets");
    lang.state(ROOT_STATE)
        .token_then(r"\[", KEYWORD, Action::Push("loop".to_string()))
        .token_then(r"\]", KEYWORD, Action::Pop(1));
    lang.state("loop").include(ROOT_STATE);
    lang.compile().unwrap()
}

fn lex<'a>(table: &PatternTable, text: &'a str) -> Vec<(TokenType, &'a str)> {
    table.tokens(text).map(|t| (t.token_type, t.text)).collect()
}

#[test]
fn nested_brackets_yield_keywords() {
    let table = bracket_table();
    let mut tokens = table.tokens("[[]]");
    let mut seen = Vec::new();
    while let Some(token) = tokens.next() {
        assert!(tokens.context().depth() >= 1);
        seen.push((token.token_type, token.text, tokens.context().depth()));
    }
    assert_eq!(
        seen,
        vec![
            (KEYWORD, "[", 2),
            (KEYWORD, "[", 3),
            (KEYWORD, "]", 2),
            (KEYWORD, "]", 1),
        ]
    );
}

#[test]
fn lone_closing_bracket_clamps_at_root() {
    let table = bracket_table();
    let mut tokens = table.tokens("]");
    assert_eq!(tokens.next().map(|t| (t.token_type, t.text)), Some((KEYWORD, "]")));
    assert_eq!(tokens.context().depth(), 1);
    assert_eq!(tokens.context().top(), table.root());
    assert!(tokens.next().is_none());
}

#[test]
fn unclosed_states_are_not_an_error() {
    let table = bracket_table();
    let mut tokens = table.tokens("[[[");
    assert_eq!(tokens.by_ref().count(), 3);
    assert_eq!(tokens.context().depth(), 4);
    assert_eq!(tokens.context().pos(), 3);
}

#[test]
fn nothing_matches_gives_one_error_per_char() {
    let mut lang = LanguageDefinition::new("Never");
    lang.state(ROOT_STATE).token("zzz", KEYWORD);
    let table = lang.compile().unwrap();

    let text = "abc\nä漢";
    let tokens = lex(&table, text);
    assert_eq!(tokens.len(), text.chars().count());
    assert!(tokens.iter().all(|(ty, _)| *ty == ERROR));
}

#[test]
fn builtin_brainfuck_round_trip() {
    let registry = LanguageRegistry::builtin().unwrap();
    let table = registry.get("brainfuck").unwrap();
    let source = "++++++++[>++++[>++>+++<<-]>+<<-]>>.]\n";
    let joined: String = table.tokens(source).map(|t| t.text).collect();
    assert_eq!(joined, source);
    assert_eq!(
        lex(table, source).last(),
        Some(&(COMMENT, "\n"))
    );
}

/// Best of three runs of a full scan, with the token count
fn timed_scan(table: &PatternTable, text: &str) -> (Duration, usize) {
    let mut best = Duration::MAX;
    let mut count = 0;
    for _ in 0..3 {
        let start = Instant::now();
        count = table.tokens(text).count();
        best = best.min(start.elapsed());
    }
    (best, count)
}

/// Scan time must grow linearly: four times the input may not cost much
/// more than four times as long. Quadratic growth would be sixteen.
fn assert_linear_scan(table: &PatternTable, unit: &str, tail: &str, repeats: usize) {
    let small = format!("{}{}", unit.repeat(repeats), tail);
    let large = format!("{}{}", unit.repeat(repeats * 4), tail);
    assert!(large.len() >= 100_000, "input too short: {}", large.len());

    let (small_time, small_count) = timed_scan(table, &small);
    let (large_time, large_count) = timed_scan(table, &large);
    assert!(large_count > small_count * 3);

    let floor = Duration::from_millis(5);
    let ratio = large_time.max(floor).as_secs_f64() / small_time.max(floor).as_secs_f64();
    assert!(
        ratio < 10.0,
        "scan time grew {ratio:.1}x for 4x input ({small_time:?} -> {large_time:?})"
    );
}

#[test]
fn long_identifier_run_scans_in_linear_time() {
    let registry = LanguageRegistry::builtin().unwrap();
    let table = registry.get("camkes").unwrap();

    assert_eq!(
        lex(table, "abc abc "),
        vec![(NAME, "abc"), (TEXT, " "), (NAME, "abc"), (TEXT, " ")]
    );
    assert_linear_scan(table, "abc ", "", 6_250);
}

#[test]
fn rules_matching_only_at_the_end_do_not_rescan() {
    let mut lang = LanguageDefinition::new("Tail");
    lang.state(ROOT_STATE)
        .token(r"/\*(.|\n)*?\*/", COMMENT_MULTILINE)
        .token(r"0[xX][0-9a-fA-F]+", LITERAL_NUMBER_HEX)
        .token(r"\s+", TEXT)
        .token(r"\w+", NAME);
    let table = lang.compile().unwrap();

    let tail = "/* end */ 0xff";
    let text = format!("{}{}", "word ".repeat(20_000), tail);
    let tokens = lex(&table, &text);
    assert_eq!(
        tokens[tokens.len() - 3..].to_vec(),
        vec![(COMMENT_MULTILINE, "/* end */"), (TEXT, " "), (LITERAL_NUMBER_HEX, "0xff")]
    );
    assert_linear_scan(&table, "word ", tail, 5_000);
}

fn builtin_tables() -> Vec<PatternTable> {
    rtflex::all_languages()
        .iter()
        .map(|lang| lang.compile().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn lexemes_reconstruct_input(text in "\\PC*") {
        for table in builtin_tables() {
            let joined: String = table.tokens(&text).map(|t| t.text).collect();
            prop_assert_eq!(&joined, &text, "language {}", table.name());
        }
    }

    #[test]
    fn every_token_consumes_input(text in "[\\[\\]+<>.,a-z \n€]{0,64}") {
        for table in builtin_tables() {
            let tokens: Vec<_> = table.tokens(&text).collect();
            prop_assert!(tokens.iter().all(|t| !t.text.is_empty()));
            prop_assert!(tokens.len() <= text.chars().count());
        }
    }

    #[test]
    fn bracket_soup_never_underflows(text in "[\\[\\]]{0,64}") {
        let table = bracket_table();
        let mut tokens = table.tokens(&text);
        let mut count = 0;
        while tokens.next().is_some() {
            count += 1;
            prop_assert!(tokens.context().depth() >= 1);
        }
        prop_assert_eq!(count, text.len());
    }
}
