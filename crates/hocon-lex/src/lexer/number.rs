//! Number literal extraction.

use crate::buffer::LexBuffer;
use crate::token::{Token, TokenTag};
use hocon_util::{Position, Result};

/// Greedily consumes an optional leading `-`, digits, and at most one `.`.
/// Exponent form (`1e10`) is not accepted; the resulting raw text is still
/// a valid `Unresolved` value under HOCON's concatenation rules.
pub fn extract_number(buf: &mut LexBuffer, start: Position) -> Result<Token> {
    let mut text = String::new();
    if buf.starts_with("-")? {
        text.push('-');
        buf.eat_chars(1)?;
    }
    let mut seen_dot = false;
    let rest = buf.take_while(|c| {
        if c.is_ascii_digit() {
            true
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            true
        } else {
            false
        }
    })?;
    text.push_str(&rest);
    Ok(Token::new(TokenTag::Number, text, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    fn extract(s: &str) -> Token {
        let mut buf = LexBuffer::new(Input::from_bytes(s.as_bytes()));
        extract_number(&mut buf, buf.position()).unwrap()
    }

    #[test]
    fn plain_integer() {
        assert_eq!(extract("42,").text, "42");
    }

    #[test]
    fn negative_integer() {
        assert_eq!(extract("-7 ").text, "-7");
    }

    #[test]
    fn decimal() {
        assert_eq!(extract("3.14}").text, "3.14");
    }

    #[test]
    fn stops_at_second_dot() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"1.2.3"));
        let tok = extract_number(&mut buf, buf.position()).unwrap();
        assert_eq!(tok.text, "1.2");
        assert_eq!(buf.peek_chars(1).unwrap(), vec!['.']);
    }
}
