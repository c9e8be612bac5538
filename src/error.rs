//! Error taxonomy (§7). `SyntaxError` and `SemanticError` originate in [`crate::parser`];
//! `EngineError` originates in [`crate::engine`] and only ever fires on input the parser should
//! already have rejected, since the engine is re-checked defensively rather than trusting its
//! caller. `ResourceError` has no constructible variant: ordinary allocation failure aborts the
//! process in safe Rust rather than returning an error, so there is nothing for this crate to
//! catch and report. It is kept in the taxonomy as documentation of the failure mode, not as a
//! type callers need to match on.

use std::sync::Arc;
use thiserror::Error;

/// A lexical or grammatical violation in the source program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character '{found}' at line {line}, column {column}")]
    UnexpectedCharacter {
        found: char,
        line: usize,
        column: usize,
    },

    #[error("unexpected token '{found}' at line {line}, column {column}")]
    UnexpectedToken {
        found: String,
        line: usize,
        column: usize,
    },

    #[error("mixed 'and'/'or' operators at the same parenthesis level at line {line}, column {column}; use parentheses to disambiguate")]
    MixedOperators { line: usize, column: usize },

    #[error("expected ';' to terminate the statement starting at line {line}, column {column}")]
    MissingSemicolon { line: usize, column: usize },

    #[error("unexpected end of input while parsing the statement starting at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },
}

/// An undeclared identifier, a redeclaration, or another violation of the static rules in §6.2
/// that is not a grammar error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("identifier '{name}' is not declared (line {line}, column {column})")]
    UndeclaredIdentifier {
        name: Arc<str>,
        line: usize,
        column: usize,
    },

    #[error("variable '{name}' is declared more than once (line {line}, column {column})")]
    Redeclaration {
        name: Arc<str>,
        line: usize,
        column: usize,
    },

    #[error("'{name}' is a reserved keyword and cannot be used as an identifier (line {line}, column {column})")]
    ReservedKeyword {
        name: Arc<str>,
        line: usize,
        column: usize,
    },
}

/// A malformed expression tree or an identifier unknown to the current variable order, raised by
/// [`crate::engine::Engine::build`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(Arc<str>),

    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}

/// The union of everything that can go wrong running a program, in the order the CLI should
/// report them: parsing before building, building before rendering.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
