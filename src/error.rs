//! Error types for rtflex

use thiserror::Error;

/// Result type alias for rtflex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Problems detected while building a pattern table, style sheet or
/// render options. All of these surface before any text is scanned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("root state `{0}` is not defined")]
    MissingRoot(String),

    #[error("state `{state}` referenced from `{referenced_from}` is not defined")]
    UndefinedState {
        state: String,
        referenced_from: String,
    },

    #[error("state inclusion cycle: {chain}")]
    IncludeCycle { chain: String },

    #[error("invalid regex in state `{state}` at rule {index}: {message}")]
    InvalidRegex {
        state: String,
        index: usize,
        message: String,
    },

    #[error(
        "rule {index} in state `{state}` declares {declared} group types but its regex has {captures} groups"
    )]
    GroupCountMismatch {
        state: String,
        index: usize,
        declared: usize,
        captures: usize,
    },

    #[error("rule {index} in state `{state}` pops zero states")]
    ZeroPop { state: String, index: usize },

    #[error("rule {index} in state `{state}` replaces the stack with nothing")]
    EmptyReplace { state: String, index: usize },

    #[error("invalid color: `{0}`")]
    InvalidColor(String),

    #[error("unknown style attribute: `{0}`")]
    UnknownStyleAttribute(String),

    #[error("unknown token type: `{0}`")]
    UnknownTokenType(String),

    #[error("unknown code page: `{0}`")]
    UnknownCodePage(String),

    #[error("invalid value for `{key}`: {message}")]
    InvalidOption { key: String, message: String },
}
