//! Lexical classification
//!
//! This module provides:
//! - the token type hierarchy and its standard registry
//! - grammar authoring and build-time validation into pattern tables
//! - the stack-based tokenizer
//! - styles and style sheets with hierarchy fallback

mod builtin;
mod language;
mod registry;
mod rules;
mod style;
mod tokenizer;
mod tokens;

pub use builtin::{all_languages, brainfuck_language};
pub use language::{LanguageDefinition, PatternTable, StateDefinition, StateItem, ROOT_STATE};
pub use registry::LanguageRegistry;
pub use rules::{words, Action, Emit, PatternDefinition, Rule, StateId, Transition};
pub use style::{Color, Style, StyleSheet};
pub use tokenizer::{Token, TokenizerContext, Tokens};
pub use tokens::{standard, Ancestors, DisplayType, TokenType, TokenTypes, TokenTypesBuilder};
