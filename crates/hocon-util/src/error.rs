//! Core error taxonomy shared by the lexer and the parser.
//!
//! This matches the error kinds the core can ever return: a malformed
//! caller argument, a failed allocation, a grammar or lexical mistake in
//! the input, invalid UTF-8, an underlying I/O failure, a reader callback
//! that aborted the parse, and a feature deliberately left unimplemented.
//! Every fallible entry point in `hocon-lex`/`hocon-par` returns
//! `Result<T, Error>`.

use crate::Position;
use thiserror::Error;

/// The single error type produced anywhere in the core.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad format tag, a null/missing reader callback, or other API misuse.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A fallible allocation failed. The core never triggers the global
    /// allocator's infallible paths on attacker-controlled sizes; this
    /// variant is reserved for the `try_reserve` guards in the lexer's
    /// growable buffer.
    #[error("out of memory")]
    OutOfMemory,

    /// A malformed token or a grammar violation: unterminated string or
    /// comment, a bad escape, a missing separator, an unexpected token, a
    /// stray character, or trailing input after the root value.
    #[error("{position}: syntax error: {message}")]
    Syntax { position: Position, message: String },

    /// Malformed UTF-8: a continuation-byte mismatch, an overlong
    /// encoding, or an out-of-range code point (RFC 3629).
    #[error("{position}: invalid encoding: {message}")]
    InvalidEncoding { position: Position, message: String },

    /// The underlying input's read primitive reported a failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A reader callback returned failure; the parse was aborted.
    #[error("reader aborted the parse at {0}")]
    ReaderAborted(Position),

    /// A feature this core deliberately defers (file/URL `include`
    /// resolution, substitution resolution, scientific-notation numbers).
    #[error("{position}: not implemented: {message}")]
    Unimplemented { position: Position, message: String },
}

impl Error {
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Error::Syntax { position, message: message.into() }
    }

    pub fn invalid_encoding(position: Position, message: impl Into<String>) -> Self {
        Error::InvalidEncoding { position, message: message.into() }
    }

    pub fn unimplemented(position: Position, message: impl Into<String>) -> Self {
        Error::Unimplemented { position, message: message.into() }
    }

    /// The source position associated with this error, when it has one.
    /// I/O errors and invalid-argument errors carry no HOCON position.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { position, .. }
            | Error::InvalidEncoding { position, .. }
            | Error::Unimplemented { position, .. } => Some(*position),
            Error::ReaderAborted(pos) => Some(*pos),
            Error::InvalidArgument(_) | Error::OutOfMemory | Error::Io(_) => None,
        }
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;
