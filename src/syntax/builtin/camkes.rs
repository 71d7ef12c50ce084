//! CAmkES component description language definition

use crate::syntax::language::{LanguageDefinition, ROOT_STATE};
use crate::syntax::rules::words;
use crate::syntax::tokens::standard::*;

const KEYWORDS: &[&str] = &[
    "assembly", "attribute", "component", "composition", "configuration", "connection",
    "connector", "consumes", "control", "dataport", "Dataport", "Dataports", "emits", "event",
    "Event", "Events", "export", "from", "group", "hardware", "has", "interface", "Interface",
    "maybe", "procedure", "Procedure", "Procedures", "provides", "template", "thread", "threads",
    "to", "uses", "with",
];

const TYPES: &[&str] = &[
    "bool", "boolean", "Buf", "char", "character", "double", "float", "in", "inout", "int",
    "int16_6", "int32_t", "int64_t", "int8_t", "integer", "mutex", "out", "real", "refin",
    "semaphore", "signed", "string", "struct", "uint16_t", "uint32_t", "uint64_t", "uint8_t",
    "uintptr_t", "unsigned", "void",
];

/// Create CAmkES language definition
pub fn camkes_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("CAmkES");
    lang.add_alias("camkes");
    lang.add_alias("idl4");
    lang.add_extension("camkes");
    lang.add_extension("idl4");

    lang.state(ROOT_STATE)
        // C pre-processor directive
        .token(r"^\s*#.*\n", COMMENT_PREPROC)
        .token(r"\s+", TEXT)
        .token(r"/\*(.|\n)*?\*/", COMMENT)
        .token(r"//.*\n", COMMENT)
        .token(r"[\[(){},.;\]]", PUNCTUATION)
        .token(r"[~!%^&*+=|?:<>/-]", OPERATOR)
        .token(&words(KEYWORDS, "", r"\b"), KEYWORD)
        .token(&words(TYPES, "", r"\b"), KEYWORD_TYPE)
        // Recognised attributes
        .token(r"[a-zA-Z_]\w*_(priority|domain|buffer)", KEYWORD_RESERVED)
        .token(&words(&["dma_pool", "from_access", "to_access"], "", r"\b"), KEYWORD_RESERVED)
        // CAmkES-level and C-level includes
        .token(r#"import\s+(<[^>]*>|"[^"]*");"#, COMMENT_PREPROC)
        .token(r#"include\s+(<[^>]*>|"[^"]*");"#, COMMENT_PREPROC)
        .token(r"0[xX][\da-fA-F]+", LITERAL_NUMBER_HEX)
        .token(r"-?[\d]+", LITERAL_NUMBER)
        .token(r"-?[\d]+\.[\d]+", LITERAL_NUMBER_FLOAT)
        .token(r#""[^"]*""#, LITERAL_STRING)
        .token(r"[Tt]rue|[Ff]alse", NAME_BUILTIN)
        .token(r"[a-zA-Z_]\w*", NAME);

    lang
}
