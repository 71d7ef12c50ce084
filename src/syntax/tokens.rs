//! Token types for syntax highlighting
//!
//! Token types form an immutable tree. Each type knows its parent, and
//! "is-a" questions are answered by walking the parent chain up to the
//! root. The tree owns every node; a [`TokenType`] is only a handle into it.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Handle to a node in a [`TokenTypes`] tree.
///
/// Handles are only meaningful for the tree that produced them. Trees
/// derived from [`TokenTypesBuilder::standard`] share the ids in [`standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenType(u32);

impl TokenType {
    /// Index of this type within its tree
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Well-known token types of the standard tree
pub mod standard {
    use super::TokenType;

    pub const ROOT: TokenType = TokenType(0);
    pub const TEXT: TokenType = TokenType(1);
    pub const TEXT_WHITESPACE: TokenType = TokenType(2);
    /// Reserved type for characters no pattern matched
    pub const ERROR: TokenType = TokenType(3);
    pub const OTHER: TokenType = TokenType(4);
    pub const KEYWORD: TokenType = TokenType(5);
    pub const KEYWORD_CONSTANT: TokenType = TokenType(6);
    pub const KEYWORD_DECLARATION: TokenType = TokenType(7);
    pub const KEYWORD_RESERVED: TokenType = TokenType(8);
    pub const KEYWORD_TYPE: TokenType = TokenType(9);
    pub const NAME: TokenType = TokenType(10);
    pub const NAME_ATTRIBUTE: TokenType = TokenType(11);
    pub const NAME_BUILTIN: TokenType = TokenType(12);
    pub const NAME_CONSTANT: TokenType = TokenType(13);
    pub const NAME_DECORATOR: TokenType = TokenType(14);
    pub const NAME_FUNCTION: TokenType = TokenType(15);
    pub const NAME_TAG: TokenType = TokenType(16);
    pub const NAME_VARIABLE: TokenType = TokenType(17);
    pub const LITERAL: TokenType = TokenType(18);
    pub const LITERAL_STRING: TokenType = TokenType(19);
    pub const LITERAL_STRING_DOUBLE: TokenType = TokenType(20);
    pub const LITERAL_STRING_SINGLE: TokenType = TokenType(21);
    pub const LITERAL_NUMBER: TokenType = TokenType(22);
    pub const LITERAL_NUMBER_FLOAT: TokenType = TokenType(23);
    pub const LITERAL_NUMBER_HEX: TokenType = TokenType(24);
    pub const LITERAL_NUMBER_INTEGER: TokenType = TokenType(25);
    pub const OPERATOR: TokenType = TokenType(26);
    pub const PUNCTUATION: TokenType = TokenType(27);
    pub const COMMENT: TokenType = TokenType(28);
    pub const COMMENT_MULTILINE: TokenType = TokenType(29);
    pub const COMMENT_PREPROC: TokenType = TokenType(30);
    pub const COMMENT_SINGLE: TokenType = TokenType(31);

    /// Paths of the standard types, in id order (root excluded)
    pub(super) const PATHS: &[&str] = &[
        "Text",
        "Text.Whitespace",
        "Error",
        "Other",
        "Keyword",
        "Keyword.Constant",
        "Keyword.Declaration",
        "Keyword.Reserved",
        "Keyword.Type",
        "Name",
        "Name.Attribute",
        "Name.Builtin",
        "Name.Constant",
        "Name.Decorator",
        "Name.Function",
        "Name.Tag",
        "Name.Variable",
        "Literal",
        "Literal.String",
        "Literal.String.Double",
        "Literal.String.Single",
        "Literal.Number",
        "Literal.Number.Float",
        "Literal.Number.Hex",
        "Literal.Number.Integer",
        "Operator",
        "Punctuation",
        "Comment",
        "Comment.Multiline",
        "Comment.Preproc",
        "Comment.Single",
    ];
}

const ROOT_NAME: &str = "Token";

#[derive(Debug, Clone)]
struct Node {
    /// Dotted path below the root ("Name.Builtin"); empty for the root
    path: String,
    parent: Option<TokenType>,
}

/// Immutable tree of token types
#[derive(Debug, Clone)]
pub struct TokenTypes {
    nodes: Vec<Node>,
    by_path: HashMap<String, TokenType>,
}

impl TokenTypes {
    /// The shared standard tree, built on first use
    pub fn standard() -> &'static TokenTypes {
        static STANDARD: OnceLock<TokenTypes> = OnceLock::new();
        STANDARD.get_or_init(|| TokenTypesBuilder::standard().build())
    }

    /// The root type
    pub fn root(&self) -> TokenType {
        standard::ROOT
    }

    /// Number of types in the tree, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least the root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Parent of a type; `None` for the root
    pub fn parent(&self, ty: TokenType) -> Option<TokenType> {
        self.nodes.get(ty.index()).and_then(|n| n.parent)
    }

    /// Walk from `ty` (inclusive) up to the root
    pub fn ancestors(&self, ty: TokenType) -> Ancestors<'_> {
        Ancestors {
            types: self,
            next: Some(ty),
        }
    }

    /// True if `ty` is `ancestor` or lies below it
    pub fn is_a(&self, ty: TokenType, ancestor: TokenType) -> bool {
        self.ancestors(ty).any(|t| t == ancestor)
    }

    /// Full dotted path, e.g. `Token.Name.Builtin`
    pub fn path(&self, ty: TokenType) -> String {
        match self.nodes.get(ty.index()) {
            Some(node) if node.path.is_empty() => ROOT_NAME.to_string(),
            Some(node) => format!("{}.{}", ROOT_NAME, node.path),
            None => format!("{}.?{}", ROOT_NAME, ty.0),
        }
    }

    /// Last path component, e.g. `Builtin`
    pub fn name(&self, ty: TokenType) -> &str {
        match self.nodes.get(ty.index()) {
            Some(node) if node.path.is_empty() => ROOT_NAME,
            Some(node) => node.path.rsplit('.').next().unwrap_or(&node.path),
            None => "?",
        }
    }

    /// Resolve a dotted path.
    ///
    /// Accepts an optional `Token.` prefix, and `String.*` / `Number.*` as
    /// shorthand for `Literal.String.*` / `Literal.Number.*`.
    pub fn lookup(&self, path: &str) -> Option<TokenType> {
        let path = path.trim();
        if path == ROOT_NAME {
            return Some(self.root());
        }
        let path = path.strip_prefix("Token.").unwrap_or(path);
        self.by_path
            .get(path)
            .or_else(|| self.by_path.get(&format!("Literal.{}", path)))
            .copied()
    }

    /// All types in id order
    pub fn iter(&self) -> impl Iterator<Item = TokenType> + '_ {
        (0..self.nodes.len() as u32).map(TokenType)
    }
}

/// Iterator over a type and its ancestors
pub struct Ancestors<'a> {
    types: &'a TokenTypes,
    next: Option<TokenType>,
}

impl Iterator for Ancestors<'_> {
    type Item = TokenType;

    fn next(&mut self) -> Option<TokenType> {
        let current = self.next?;
        self.next = self.types.parent(current);
        Some(current)
    }
}

/// Builder for a [`TokenTypes`] tree
#[derive(Debug, Clone)]
pub struct TokenTypesBuilder {
    nodes: Vec<Node>,
    by_path: HashMap<String, TokenType>,
}

impl TokenTypesBuilder {
    /// A tree holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                path: String::new(),
                parent: None,
            }],
            by_path: HashMap::new(),
        }
    }

    /// A tree pre-populated with the [`standard`] types at their fixed ids
    pub fn standard() -> Self {
        let mut builder = Self::new();
        for path in standard::PATHS {
            builder.add(path);
        }
        debug_assert_eq!(builder.nodes.len(), standard::PATHS.len() + 1);
        builder
    }

    /// Add a dotted path, creating missing ancestors. Returns the existing
    /// type if the path is already present.
    pub fn add(&mut self, path: &str) -> TokenType {
        let path = path.trim().trim_start_matches("Token.");
        if path.is_empty() || path == ROOT_NAME {
            return standard::ROOT;
        }
        if let Some(&ty) = self.by_path.get(path) {
            return ty;
        }
        let parent = match path.rfind('.') {
            Some(dot) => self.add(&path[..dot]),
            None => standard::ROOT,
        };
        let ty = TokenType(self.nodes.len() as u32);
        self.nodes.push(Node {
            path: path.to_string(),
            parent: Some(parent),
        });
        self.by_path.insert(path.to_string(), ty);
        ty
    }

    /// Freeze the tree
    pub fn build(self) -> TokenTypes {
        TokenTypes {
            nodes: self.nodes,
            by_path: self.by_path,
        }
    }
}

impl Default for TokenTypesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays a type by its full path when paired with its tree
pub struct DisplayType<'a>(pub &'a TokenTypes, pub TokenType);

impl fmt::Display for DisplayType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.path(self.1))
    }
}
