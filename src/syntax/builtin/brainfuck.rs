//! Brainfuck language definition

use crate::syntax::language::{LanguageDefinition, ROOT_STATE};
use crate::syntax::rules::Action;
use crate::syntax::tokens::standard::*;

/// Create Brainfuck language definition.
///
/// Loop brackets are tracked on the state stack, so a `]` without a
/// matching `[` is flagged as an error.
pub fn brainfuck_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Brainfuck");
    lang.add_alias("bf");
    lang.add_extension("bf");
    lang.add_extension("b");

    // Instruction classes get distinct colors
    lang.state("common")
        .token(r"[.,]+", NAME_TAG)
        .token(r"[+-]+", NAME_BUILTIN)
        .token(r"[<>]+", NAME_VARIABLE)
        .token(r"[^.,+\-<>\[\]]+", COMMENT);

    lang.state(ROOT_STATE)
        .token_then(r"\[", KEYWORD, Action::Push("loop".to_string()))
        .token(r"\]", ERROR)
        .include("common");

    lang.state("loop")
        .token_then(r"\[", KEYWORD, Action::PushCurrent)
        .token_then(r"\]", KEYWORD, Action::Pop(1))
        .include("common");

    lang
}
