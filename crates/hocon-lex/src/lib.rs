//! Buffered UTF-8 lexer for HOCON source text.
//!
//! Turns a byte stream into position-tagged tokens: whitespace and
//! comments (kept, since HOCON treats a semantic newline as an implicit
//! item separator), punctuation, keywords, numbers, unquoted runs, and
//! quoted/triple-quoted strings with escapes decoded. The lexer is
//! stateless between tokens; grammar decisions belong to `hocon-par`.

pub mod buffer;
pub mod codec;
mod edge_cases;
pub mod input;
mod lexer;
pub mod token;

pub use input::Input;
pub use lexer::{is_hocon_whitespace, Lexer};
pub use token::{ReadOptions, Token, TokenArray, TokenTag};
