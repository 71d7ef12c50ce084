//! Built-in language definitions
//!
//! Small grammars bundled with the crate. They double as worked examples
//! of states, inclusion and stack actions.

mod befunge;
mod brainfuck;
mod camkes;
mod redcode;

use super::language::LanguageDefinition;

pub use brainfuck::brainfuck_language;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![
        brainfuck::brainfuck_language(),
        befunge::befunge_language(),
        redcode::redcode_language(),
        camkes::camkes_language(),
    ]
}
