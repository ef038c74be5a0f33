//! Event-driven HOCON grammar and tree assembly.
//!
//! `hocon-par` pulls tokens from `hocon-lex` and drives a `Reader`: the
//! object/array grammar, value concatenation, path keys, and substitution
//! markers of HOCON all live here. `TreeReader` is the bundled concrete
//! sink that assembles an `Object`/`Array` tree and performs HOCON's
//! post-processing (key sort, duplicate-key merge under assign vs.
//! append); `TokenPrinterReader` is a lighter sink for asserting on the
//! raw event sequence.

mod debug_sink;
mod parser;
mod reader;
mod tree_sink;
mod value;

pub use debug_sink::TokenPrinterReader;
pub use parser::{parse, Parser, ParserOptions};
pub use reader::{Assignment, Format, Reader};
pub use tree_sink::TreeReader;
pub use value::{Array, Object, ObjectEntry, Tree, Value};
