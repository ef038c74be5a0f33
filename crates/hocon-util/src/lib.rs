//! Shared foundation types for the HOCON parsing core.
//!
//! This crate has no HOCON-specific logic of its own: it holds the source
//! position model (`Position`), the error taxonomy every fallible entry
//! point in `hocon-lex`/`hocon-par` returns (`Error`/`Result`), and the
//! diagnostic-reporting stack (`Handler`/`Diagnostic`/`Level`) those crates
//! report through.

mod diagnostic;
mod error;
mod position;

pub use diagnostic::{debug_enabled, set_debug_enabled, set_global_writer, Diagnostic, Handler, Level};
pub use error::{Error, Result};
pub use position::Position;
