//! Line and block comment extraction.

use crate::buffer::LexBuffer;
use crate::token::{ReadOptions, Token, TokenTag};
use hocon_util::{Error, Position, Result};

/// Consumes a `#` or `//` line comment, up to but not including the
/// terminating `\n` (which is left for the next `extract_ws` call).
pub fn extract_line_comment(buf: &mut LexBuffer, start: Position, options: ReadOptions) -> Result<Token> {
    if buf.starts_with("#")? {
        buf.eat_chars(1)?;
    } else {
        buf.eat_chars(2)?; // "//"
    }
    let text = buf.take_while(|c| c != '\n')?;
    let payload = if options.include_comment_text { text } else { String::new() };
    Ok(Token::new(TokenTag::Comment, payload, start))
}

/// Consumes a `/* ... */` block comment. Unterminated comments are fatal.
pub fn extract_block_comment(buf: &mut LexBuffer, start: Position, options: ReadOptions) -> Result<Token> {
    buf.eat_chars(2)?; // "/*"
    let mut text = String::new();
    loop {
        let lookahead = buf.peek_chars(1)?;
        let Some(&c) = lookahead.first() else {
            return Err(Error::syntax(start, "/* comment without matching */"));
        };
        if c == '*' && buf.starts_with("*/")? {
            buf.eat_chars(2)?;
            break;
        }
        text.push(c);
        buf.eat_chars(1)?;
    }
    let payload = if options.include_comment_text { text } else { String::new() };
    Ok(Token::new(TokenTag::Comment, payload, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    fn extract_line(s: &str) -> Token {
        let mut buf = LexBuffer::new(Input::from_bytes(s.as_bytes()));
        extract_line_comment(&mut buf, buf.position(), ReadOptions::default()).unwrap()
    }

    #[test]
    fn hash_comment_stops_before_newline() {
        let tok = extract_line("# hi\nrest");
        assert_eq!(tok.text, " hi");
    }

    #[test]
    fn double_slash_comment_stops_before_newline() {
        let tok = extract_line("// hi\nrest");
        assert_eq!(tok.text, " hi");
    }

    #[test]
    fn block_comment_consumes_to_closer() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"/* a */rest"));
        let tok = extract_block_comment(&mut buf, buf.position(), ReadOptions::default()).unwrap();
        assert_eq!(tok.text, " a ");
        assert_eq!(buf.peek_chars(1).unwrap(), vec!['r']);
    }

    #[test]
    fn unterminated_block_comment_is_a_syntax_error() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"/* never closes"));
        let err = extract_block_comment(&mut buf, buf.position(), ReadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("without matching"));
    }
}
