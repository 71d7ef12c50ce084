//! Redcode (ICWS'94) language definition

use crate::syntax::language::{LanguageDefinition, ROOT_STATE};
use crate::syntax::rules::words;
use crate::syntax::tokens::standard::*;

const OPCODES: &[&str] = &[
    "DAT", "MOV", "ADD", "SUB", "MUL", "DIV", "MOD", "JMP", "JMZ", "JMN", "DJN", "CMP", "SLT",
    "SPL", "ORG", "EQU", "END",
];

const MODIFIERS: &[&str] = &["A", "B", "AB", "BA", "F", "X", "I"];

/// Create Redcode language definition
pub fn redcode_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Redcode");
    lang.add_alias("redcode");
    lang.add_extension("cw");

    lang.state(ROOT_STATE)
        .token(r"\s+", TEXT)
        .token(r";.*$", COMMENT_SINGLE)
        .token(&words(OPCODES, r"\b", r"\b"), NAME_FUNCTION)
        .token(&words(MODIFIERS, r"\b", r"\b"), NAME_DECORATOR)
        .token(r"[A-Za-z_]\w+", NAME)
        .token(r"[-+*/%]", OPERATOR)
        // Addressing modes
        .token(r"[#$@<>]", OPERATOR)
        .token(r"[.,]", PUNCTUATION)
        .token(r"[-+]?\d+", LITERAL_NUMBER_INTEGER);

    lang
}
