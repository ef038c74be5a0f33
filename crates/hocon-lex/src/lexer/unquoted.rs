//! Unquoted text extraction.

use crate::buffer::LexBuffer;
use crate::lexer::whitespace::is_hocon_whitespace;
use crate::token::{Token, TokenTag};
use hocon_util::{Position, Result};

/// Characters HOCON forbids inside an unquoted string. A quoted string or
/// an escape is required to express any of these.
const FORBIDDEN: &[char] = &[
    '$', '"', '{', '}', '[', ']', ':', '=', ',', '+', '#', '`', '^', '?', '!', '@', '*', '&', '\\',
];

pub fn is_forbidden(ch: char) -> bool {
    FORBIDDEN.contains(&ch)
}

fn starts_comment(buf: &mut LexBuffer) -> Result<bool> {
    let chars = buf.peek_chars(2)?;
    Ok(match chars.first() {
        Some('#') => true,
        Some('/') => matches!(chars.get(1), Some('/') | Some('*')),
        _ => false,
    })
}

/// Consumes a maximal run of "unquoted-safe" characters: anything that is
/// not HOCON whitespace, not one of the forbidden characters, and does not
/// start a comment.
pub fn extract_unquoted(buf: &mut LexBuffer, start: Position) -> Result<Token> {
    let mut text = String::new();
    loop {
        if starts_comment(buf)? {
            break;
        }
        let chars = buf.peek_chars(1)?;
        match chars.first() {
            Some(&c) if !is_hocon_whitespace(c) && !is_forbidden(c) => {
                text.push(c);
                buf.eat_chars(1)?;
            }
            _ => break,
        }
    }
    Ok(Token::new(TokenTag::Unquoted, text, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    fn extract(s: &str) -> Token {
        let mut buf = LexBuffer::new(Input::from_bytes(s.as_bytes()));
        extract_unquoted(&mut buf, buf.position()).unwrap()
    }

    #[test]
    fn reads_up_to_whitespace() {
        assert_eq!(extract("hello world").text, "hello");
    }

    #[test]
    fn stops_at_forbidden_character() {
        assert_eq!(extract("path:value").text, "path");
    }

    #[test]
    fn stops_before_line_comment() {
        assert_eq!(extract("value//comment").text, "value");
    }

    #[test]
    fn stops_before_block_comment() {
        assert_eq!(extract("value/*comment*/").text, "value");
    }

    #[test]
    fn allows_a_lone_slash() {
        assert_eq!(extract("a/b c").text, "a/b");
    }
}
