//! `TokenPrinterReader` -- a small debug/test sink that records each event
//! as a line of text instead of building a tree. Useful for asserting on
//! the exact event sequence the parser emits (scenario 8 of the tree's
//! testable properties checks a single `var_sub` event this way).

use hocon_lex::{Token, TokenArray};

use crate::reader::{Assignment, Reader};

/// Records one line of text per callback, in call order.
#[derive(Debug, Default)]
pub struct TokenPrinterReader {
    pub lines: Vec<String>,
}

impl TokenPrinterReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_text(key_toks: &TokenArray) -> String {
        key_toks.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join("")
    }
}

impl Reader for TokenPrinterReader {
    fn obj_start(&mut self) -> bool {
        self.lines.push("obj_start".to_string());
        true
    }

    fn obj_end(&mut self) -> bool {
        self.lines.push("obj_end".to_string());
        true
    }

    fn arr_start(&mut self) -> bool {
        self.lines.push("arr_start".to_string());
        true
    }

    fn arr_end(&mut self) -> bool {
        self.lines.push("arr_end".to_string());
        true
    }

    fn key_val_start(&mut self, key_toks: TokenArray, sep: Assignment) -> bool {
        self.lines.push(format!("key_val_start {:?} {}", sep, Self::key_text(&key_toks)));
        true
    }

    fn key_val_end(&mut self) -> bool {
        self.lines.push("key_val_end".to_string());
        true
    }

    fn val_start(&mut self) -> bool {
        self.lines.push("val_start".to_string());
        true
    }

    fn val_end(&mut self) -> bool {
        self.lines.push("val_end".to_string());
        true
    }

    fn token(&mut self, tok: Token) -> bool {
        self.lines.push(format!("token {:?} {:?}", tok.tag, tok.text));
        true
    }

    fn var_sub(&mut self, path_toks: TokenArray, optional: bool) -> bool {
        self.lines.push(format!("var_sub optional={} {}", optional, Self::key_text(&path_toks)));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hocon_lex::{Input, ReadOptions};
    use hocon_util::{Handler, Result};

    use crate::parser::{parse, ParserOptions};
    use crate::reader::Format;

    fn run(source: &str) -> Result<Vec<String>> {
        let mut sink = TokenPrinterReader::new();
        let handler = Handler::new();
        parse(
            Input::from_bytes(source.as_bytes()),
            Format::Hocon,
            &mut sink,
            ParserOptions { lex: ReadOptions::default(), allow_empty_value: true },
            &handler,
        )?;
        Ok(sink.lines)
    }

    #[test]
    fn optional_substitution_emits_one_var_sub_event() {
        let lines = run("a = ${?missing}\n").unwrap();
        assert!(lines.iter().any(|l| l == "var_sub optional=true missing"));
        assert!(lines.contains(&"key_val_end".to_string()));
    }

    #[test]
    fn flat_object_emits_matching_start_and_end_events() {
        let lines = run(r#"{"a":1,"b":2}"#).unwrap();
        assert_eq!(lines.first().unwrap(), "obj_start");
        assert_eq!(lines.last().unwrap(), "obj_end");
    }
}
