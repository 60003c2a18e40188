//! Typed error hierarchy for the replay pipeline.
//!
//! Each pipeline stage (spec.md §7) gets its own error enum so a
//! failure carries the context of the stage that raised it. All four
//! funnel into [`ReplayError`], which is what a [`crate::session::Session`]
//! hands back to its caller.

use thiserror::Error;

/// Failures raised while scanning characters into lexical atoms (§4.1).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("unrecognized character {found:?} at byte offset {offset}")]
    UnrecognizedChar { found: char, offset: usize },

    #[error("non-printable byte {found:#04x} inside string literal at offset {offset}")]
    NonPrintableInString { found: u8, offset: usize },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("unterminated string literal starting at offset {start}")]
    UnterminatedString { start: usize },

    #[error("unterminated comment starting at offset {start}")]
    UnterminatedComment { start: usize },

    #[error("I/O error while reading input: {0}")]
    Io(String),
}

/// Failures raised by the grammar driver (§4.2): an atom arrived in a
/// state with no matching transition.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GrammarError {
    #[error("no transition for atom {atom} in state {state}")]
    NoTransition { state: &'static str, atom: String },

    #[error("parenthesis depth underflowed (more ')' than '(')")]
    UnbalancedParens,
}

/// Failures raised while interpreting a half-move's SAN text (§4.3).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InterpretError {
    #[error("empty move text")]
    Empty,

    #[error("move text {text:?} has leftover characters {leftover:?} after parsing")]
    TrailingCharacters { text: String, leftover: String },

    #[error("unknown piece letter {found:?} in move text {text:?}")]
    UnknownPiece { text: String, found: char },

    #[error("move text {text:?} names no destination square")]
    MissingDestination { text: String },
}

/// Failures raised by the board engine while resolving and applying a
/// move (§4.4).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BoardError {
    #[error("move has no legal source/destination resolution")]
    NoLegalResolution,

    #[error("move is ambiguous: {count} legal resolutions found")]
    AmbiguousResolution { count: usize },

    #[error("castling intermediate square is not empty")]
    CastlingBlocked,

    #[error("coordinate ({row}, {col}) is out of range")]
    OutOfRange { row: i32, col: i32 },
}

/// Aggregate error returned by a full replay session.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
