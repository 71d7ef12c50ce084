//! Befunge language definition

use crate::syntax::language::{LanguageDefinition, ROOT_STATE};
use crate::syntax::tokens::standard::*;

/// Create Befunge language definition
pub fn befunge_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Befunge");
    lang.add_alias("befunge");
    lang.add_extension("befunge");

    lang.state(ROOT_STATE)
        .token(r"[0-9a-f]", LITERAL_NUMBER)
        // Arithmetic
        .token(r"[+*/%!`-]", OPERATOR)
        // Movement and imperatives
        .token(r"[<>^v?\[\]rxjk]", NAME_VARIABLE)
        // Stack operations
        .token(r"[:\\$.,n]", NAME_BUILTIN)
        .token(r"[|_mw]", KEYWORD)
        .token(r"[{}]", NAME_TAG)
        // No escapes inside string mode
        .token(r#"".*?""#, LITERAL_STRING_DOUBLE)
        .token(r"'.", LITERAL_STRING_SINGLE)
        // Trampoline
        .token(r"[#;]", COMMENT)
        .token(r"[pg&~=@iotsy]", KEYWORD)
        // Fingerprints
        .token(r"[()A-Z]", COMMENT)
        .token(r"\s+", TEXT);

    lang
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_mode_and_ops() {
        let table = befunge_language().compile().unwrap();
        let tokens: Vec<_> = table
            .tokens("\"hi\",@")
            .map(|t| (t.token_type, t.text))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (LITERAL_STRING_DOUBLE, "\"hi\""),
                (NAME_BUILTIN, ","),
                (KEYWORD, "@"),
            ]
        );
    }
}
