//! Language definitions and compiled pattern tables
//!
//! A [`LanguageDefinition`] is the authoring form: named states holding
//! rules and inclusions of other states. [`LanguageDefinition::compile`]
//! validates it and flattens every inclusion, producing a [`PatternTable`]
//! in which each state is one ordered list of rules.

use std::collections::HashMap;

use crate::error::ConfigError;

use super::rules::{compile_regex, Action, Emit, PatternDefinition, Rule, StateId, Transition};
use super::tokenizer::Tokens;
use super::tokens::TokenType;

/// Name of the state scanning starts in unless another is chosen
pub const ROOT_STATE: &str = "root";

/// One entry of a state, in declaration order
#[derive(Debug, Clone)]
pub enum StateItem {
    Rule(PatternDefinition),
    /// Splice another state's rules in at this position
    Include(String),
}

/// A named, ordered list of rules and inclusions
#[derive(Debug, Clone)]
pub struct StateDefinition {
    pub name: String,
    pub items: Vec<StateItem>,
}

impl StateDefinition {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    /// Rule emitting `token_type`, leaving the stack alone
    pub fn token(&mut self, pattern: &str, token_type: TokenType) -> &mut Self {
        self.token_then(pattern, token_type, Action::None)
    }

    /// Rule emitting `token_type`, then applying `action`
    pub fn token_then(&mut self, pattern: &str, token_type: TokenType, action: Action) -> &mut Self {
        self.add(PatternDefinition::new(pattern, token_type, action))
    }

    /// Rule emitting one token per capture group
    pub fn by_groups(&mut self, pattern: &str, types: &[TokenType], action: Action) -> &mut Self {
        self.add(PatternDefinition::by_groups(pattern, types, action))
    }

    /// Add a prepared rule
    pub fn add(&mut self, rule: PatternDefinition) -> &mut Self {
        self.items.push(StateItem::Rule(rule));
        self
    }

    /// Include another state's rules at this position
    pub fn include(&mut self, state: &str) -> &mut Self {
        self.items.push(StateItem::Include(state.to_string()));
        self
    }
}

/// A complete language definition, as authored
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name (e.g., "Brainfuck")
    pub name: String,
    /// Alternative lookup names (e.g., ["bf"])
    pub aliases: Vec<String>,
    /// File extensions without the dot (e.g., ["bf", "b"])
    pub extensions: Vec<String>,
    states: Vec<StateDefinition>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Add a lookup alias
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.trim_start_matches('.').to_string());
    }

    /// Get a state for editing, creating it if needed
    pub fn state(&mut self, name: &str) -> &mut StateDefinition {
        let idx = match self.states.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.states.push(StateDefinition::new(name));
                self.states.len() - 1
            }
        };
        &mut self.states[idx]
    }

    /// States in definition order
    pub fn states(&self) -> &[StateDefinition] {
        &self.states
    }

    /// Compile with scanning starting in the `root` state
    pub fn compile(&self) -> Result<PatternTable, ConfigError> {
        self.compile_with_root(ROOT_STATE)
    }

    /// Validate, compile and flatten into a [`PatternTable`]
    pub fn compile_with_root(&self, root: &str) -> Result<PatternTable, ConfigError> {
        let index: HashMap<String, StateId> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), StateId(i)))
            .collect();

        let root_id = *index
            .get(root)
            .ok_or_else(|| ConfigError::MissingRoot(root.to_string()))?;

        // Compile every rule once; inclusions share the compiled rule
        let mut rules = Vec::new();
        let mut own: Vec<Vec<Slot>> = Vec::with_capacity(self.states.len());
        for state in &self.states {
            let mut slots = Vec::with_capacity(state.items.len());
            for (i, item) in state.items.iter().enumerate() {
                match item {
                    StateItem::Rule(def) => {
                        rules.push(compile_rule(def, &state.name, i, &index)?);
                        slots.push(Slot::Rule(rules.len() - 1));
                    }
                    StateItem::Include(target) => {
                        let id = index.get(target).ok_or_else(|| ConfigError::UndefinedState {
                            state: target.clone(),
                            referenced_from: state.name.clone(),
                        })?;
                        slots.push(Slot::Include(*id));
                    }
                }
            }
            own.push(slots);
        }

        let mut flat: Vec<Option<Vec<usize>>> = vec![None; self.states.len()];
        let mut visiting = Vec::new();
        for i in 0..self.states.len() {
            self.flatten(StateId(i), &own, &mut flat, &mut visiting)?;
        }

        let states = self
            .states
            .iter()
            .zip(flat)
            .map(|(def, rule_ids)| CompiledState {
                name: def.name.clone(),
                rules: rule_ids.unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            language = %self.name,
            states = states.len(),
            rules = rules.len(),
            "built pattern table"
        );

        Ok(PatternTable {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            extensions: self.extensions.clone(),
            rules,
            states,
            index,
            root: root_id,
        })
    }

    /// Inline inclusions of one state, detecting cycles
    fn flatten(
        &self,
        id: StateId,
        own: &[Vec<Slot>],
        flat: &mut [Option<Vec<usize>>],
        visiting: &mut Vec<StateId>,
    ) -> Result<(), ConfigError> {
        if flat[id.0].is_some() {
            return Ok(());
        }
        if visiting.contains(&id) {
            let mut chain: Vec<&str> = visiting
                .iter()
                .skip_while(|v| **v != id)
                .map(|v| self.states[v.0].name.as_str())
                .collect();
            chain.push(&self.states[id.0].name);
            return Err(ConfigError::IncludeCycle {
                chain: chain.join(" -> "),
            });
        }

        visiting.push(id);
        let mut list = Vec::new();
        for slot in &own[id.0] {
            match *slot {
                Slot::Rule(rule) => list.push(rule),
                Slot::Include(target) => {
                    self.flatten(target, own, flat, visiting)?;
                    if let Some(included) = &flat[target.0] {
                        list.extend_from_slice(included);
                    }
                }
            }
        }
        visiting.pop();
        flat[id.0] = Some(list);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Rule(usize),
    Include(StateId),
}

fn compile_rule(
    def: &PatternDefinition,
    state: &str,
    index_in_state: usize,
    states: &HashMap<String, StateId>,
) -> Result<Rule, ConfigError> {
    let regex = compile_regex(&def.pattern).map_err(|e| ConfigError::InvalidRegex {
        state: state.to_string(),
        index: index_in_state,
        message: e.to_string(),
    })?;

    if let Emit::Groups(types) = &def.emit {
        let captures = regex.captures_len().saturating_sub(1);
        if types.len() != captures {
            return Err(ConfigError::GroupCountMismatch {
                state: state.to_string(),
                index: index_in_state,
                declared: types.len(),
                captures,
            });
        }
    }

    let resolve = |name: &String| {
        states
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UndefinedState {
                state: name.clone(),
                referenced_from: state.to_string(),
            })
    };

    let transition = match &def.action {
        Action::None => Transition::None,
        Action::Push(name) => Transition::Push(resolve(name)?),
        Action::PushCurrent => Transition::PushCurrent,
        Action::Pop(0) => {
            return Err(ConfigError::ZeroPop {
                state: state.to_string(),
                index: index_in_state,
            })
        }
        Action::Pop(n) => Transition::Pop(*n),
        Action::Replace(names) if names.is_empty() => {
            return Err(ConfigError::EmptyReplace {
                state: state.to_string(),
                index: index_in_state,
            })
        }
        Action::Replace(names) => {
            Transition::Replace(names.iter().map(resolve).collect::<Result<_, _>>()?)
        }
    };

    Ok(Rule {
        source: def.pattern.clone(),
        regex,
        emit: def.emit.clone(),
        transition,
    })
}

/// A state after inclusion flattening
#[derive(Debug, Clone)]
pub struct CompiledState {
    name: String,
    /// Indices into the table's rule pool, in match order
    rules: Vec<usize>,
}

impl CompiledState {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable, validated set of flattened states.
///
/// Safe to share between threads; every tokenizer run keeps its own
/// context.
#[derive(Debug, Clone)]
pub struct PatternTable {
    name: String,
    aliases: Vec<String>,
    extensions: Vec<String>,
    rules: Vec<Rule>,
    states: Vec<CompiledState>,
    index: HashMap<String, StateId>,
    root: StateId,
}

impl PatternTable {
    /// Language name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// State scanning starts in
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Look up a state by name
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    /// Name of a state
    pub fn state_name(&self, id: StateId) -> &str {
        self.states.get(id.0).map_or("", |s| s.name())
    }

    /// Flattened rules of a state, in match order
    pub fn rules(&self, id: StateId) -> impl Iterator<Item = &Rule> + '_ {
        self.states
            .get(id.0)
            .into_iter()
            .flat_map(|s| s.rules.iter())
            .map(move |&r| &self.rules[r])
    }

    /// Number of states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Lazily tokenize `text`
    pub fn tokens<'t, 'a>(&'t self, text: &'a str) -> Tokens<'t, 'a> {
        Tokens::new(self, text)
    }
}
