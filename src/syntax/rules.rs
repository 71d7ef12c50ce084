//! Pattern rules for tokenization
//!
//! This module defines the authoring form of a rule ([`PatternDefinition`])
//! and the compiled form the tokenizer runs ([`Rule`]).

use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::captures::Captures;
use regex_automata::{Anchored, Input};

use super::tokens::TokenType;

/// What a matched rule does to the state stack
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Action {
    /// Leave the stack alone
    #[default]
    None,
    /// Push a named state
    Push(String),
    /// Push the currently active state again
    PushCurrent,
    /// Pop this many states (at least one)
    Pop(usize),
    /// Replace the whole stack; the first name becomes the bottom entry
    Replace(Vec<String>),
}

/// Token type(s) a rule emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// One token covering the whole match
    Token(TokenType),
    /// One token per capture group, in group order
    Groups(Vec<TokenType>),
}

/// A rule as written by a grammar author
#[derive(Debug, Clone)]
pub struct PatternDefinition {
    /// Regex source
    pub pattern: String,
    pub emit: Emit,
    pub action: Action,
}

impl PatternDefinition {
    /// Create a rule emitting a single token type
    pub fn new(pattern: &str, token_type: TokenType, action: Action) -> Self {
        Self {
            pattern: pattern.to_string(),
            emit: Emit::Token(token_type),
            action,
        }
    }

    /// Create a rule emitting one token per capture group
    pub fn by_groups(pattern: &str, types: &[TokenType], action: Action) -> Self {
        Self {
            pattern: pattern.to_string(),
            emit: Emit::Groups(types.to_vec()),
            action,
        }
    }
}

/// Index of a state inside a compiled table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

/// Stack effect with state names already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    Push(StateId),
    PushCurrent,
    Pop(usize),
    Replace(Vec<StateId>),
}

/// A compiled, validated rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) source: String,
    pub(crate) regex: Regex,
    pub(crate) emit: Emit,
    pub(crate) transition: Transition,
}

impl Rule {
    /// Match a non-empty prefix of `text[pos..]`, returning its end.
    ///
    /// The search is anchored at `pos` but the regex still sees the whole
    /// text, so `^`, `$` and `\b` behave relative to the surrounding input
    /// rather than the slice. A rule that fails gives up at `pos`.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<usize> {
        let found = self.regex.search(&anchored_at(text, pos))?;
        (found.end() > pos).then_some(found.end())
    }

    /// Like [`Rule::match_at`], but with the capture group spans
    pub fn captures_at(&self, text: &str, pos: usize) -> Option<Captures> {
        let mut caps = self.regex.create_captures();
        self.regex.search_captures(&anchored_at(text, pos), &mut caps);
        let whole = caps.get_match()?;
        (whole.end() > pos).then_some(caps)
    }

    /// Number of explicit capture groups
    pub fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Regex source this rule was compiled from
    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn emit(&self) -> &Emit {
        &self.emit
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }
}

fn anchored_at(text: &str, pos: usize) -> Input<'_> {
    Input::new(text).range(pos..).anchored(Anchored::Yes)
}

/// Compile a rule's regex. Rules run in multi-line mode.
pub(crate) fn compile_regex(pattern: &str) -> Result<Regex, BuildError> {
    Regex::new(&format!("(?m){}", pattern))
}

/// Build an alternation matching any of `words` literally.
///
/// Longer words are tried first so that `in` never shadows `inout`.
pub fn words(words: &[&str], prefix: &str, suffix: &str) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();
    let body = sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    format!("{}(?:{}){}", prefix, body, suffix)
}
