//! Stack-based tokenizer
//!
//! Runs a [`PatternTable`] over input text. The active state is the top of
//! a stack of state ids; its flattened rules are tried in declaration order
//! and the first non-empty match at the current offset wins. When nothing
//! matches, one character is emitted as [`standard::ERROR`] and scanning
//! moves on, so every step consumes input and a run over `n` characters
//! takes at most `n` steps.

use std::collections::VecDeque;

use regex_automata::util::captures::Captures;

use super::language::PatternTable;
use super::rules::{Emit, StateId, Transition};
use super::tokens::{standard, TokenType};

/// A classified slice of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub token_type: TokenType,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType, text: &'a str) -> Self {
        Self { token_type, text }
    }
}

/// Per-run scanner state
#[derive(Debug, Clone)]
pub struct TokenizerContext {
    /// Active states, bottom first; never empty
    stack: Vec<StateId>,
    /// Byte offset of the next unconsumed character
    pos: usize,
}

impl TokenizerContext {
    /// Start at offset zero in `root`
    pub fn new(root: StateId) -> Self {
        Self {
            stack: vec![root],
            pos: 0,
        }
    }

    /// The active state
    pub fn top(&self) -> StateId {
        // The stack is never empty; see `apply`
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Apply a rule's stack effect.
    ///
    /// Pops never remove the bottom entry; popping past it clamps.
    fn apply(&mut self, transition: &Transition) {
        match transition {
            Transition::None => {}
            Transition::Push(id) => self.stack.push(*id),
            Transition::PushCurrent => self.stack.push(self.top()),
            Transition::Pop(count) => {
                let keep = self.stack.len().saturating_sub(*count).max(1);
                if self.stack.len() - keep < *count {
                    tracing::trace!(
                        requested = *count,
                        depth = self.stack.len(),
                        "pop below bottom of stack clamped"
                    );
                }
                self.stack.truncate(keep);
            }
            Transition::Replace(ids) => {
                self.stack.clear();
                self.stack.extend_from_slice(ids);
            }
        }
    }
}

/// Lazy token stream over one input.
///
/// Produced by [`PatternTable::tokens`]. Lexemes borrow from the input and,
/// concatenated in order, reproduce it exactly.
pub struct Tokens<'t, 'a> {
    table: &'t PatternTable,
    text: &'a str,
    ctx: TokenizerContext,
    /// Tokens from a multi-group match not yet handed out
    pending: VecDeque<Token<'a>>,
}

impl<'t, 'a> Tokens<'t, 'a> {
    pub(crate) fn new(table: &'t PatternTable, text: &'a str) -> Self {
        Self {
            table,
            text,
            ctx: TokenizerContext::new(table.root()),
            pending: VecDeque::new(),
        }
    }

    /// Scanner state between tokens
    pub fn context(&self) -> &TokenizerContext {
        &self.ctx
    }

    /// Consume input at the current offset, queueing at least one token
    fn step(&mut self) {
        let table = self.table;
        let text = self.text;
        let pos = self.ctx.pos;

        for rule in table.rules(self.ctx.top()) {
            let Some(end) = rule.match_at(text, pos) else {
                continue;
            };
            match rule.emit() {
                Emit::Token(ty) => self.pending.push_back(Token::new(*ty, &text[pos..end])),
                Emit::Groups(types) => match rule.captures_at(text, pos) {
                    Some(caps) => push_groups(&mut self.pending, text, &caps, types, pos, end),
                    None => self.pending.push_back(Token::new(standard::TEXT, &text[pos..end])),
                },
            }
            self.ctx.pos = end;
            if *rule.transition() != Transition::None {
                self.ctx.apply(rule.transition());
                tracing::trace!(
                    state = table.state_name(self.ctx.top()),
                    depth = self.ctx.depth(),
                    "state transition"
                );
            }
            return;
        }

        let width = text[pos..].chars().next().map_or(1, char::len_utf8);
        self.pending
            .push_back(Token::new(standard::ERROR, &text[pos..pos + width]));
        self.ctx.pos = pos + width;
    }
}

/// Queue one token per participating group. Match text outside every group
/// becomes `Text` so nothing is dropped.
fn push_groups<'a>(
    out: &mut VecDeque<Token<'a>>,
    text: &'a str,
    caps: &Captures,
    types: &[TokenType],
    start: usize,
    end: usize,
) {
    let mut cursor = start;
    for (i, ty) in types.iter().enumerate() {
        let Some(group) = caps.get_group(i + 1) else {
            continue;
        };
        // Empty groups and groups nested in one already emitted
        if group.is_empty() || group.start < cursor {
            continue;
        }
        if group.start > cursor {
            out.push_back(Token::new(standard::TEXT, &text[cursor..group.start]));
        }
        out.push_back(Token::new(*ty, &text[group.range()]));
        cursor = group.end;
    }
    if cursor < end {
        out.push_back(Token::new(standard::TEXT, &text[cursor..end]));
    }
}

impl<'a> Iterator for Tokens<'_, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.ctx.pos >= self.text.len() {
            return None;
        }
        self.step();
        self.pending.pop_front()
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}
