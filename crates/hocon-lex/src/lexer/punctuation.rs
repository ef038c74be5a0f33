//! Single-character punctuation, keyword recognition, and substitution
//! openers (`${` / `${?`).

use crate::buffer::LexBuffer;
use crate::lexer::unquoted::{extract_unquoted, is_forbidden};
use crate::lexer::whitespace::is_hocon_whitespace;
use crate::token::{Token, TokenTag};
use hocon_util::{Error, Position, Result};

/// Peeks exactly `keyword`'s length in characters; if they match and the
/// following character (if any) is not unquoted-safe, emits the keyword
/// token. Otherwise falls back to `extract_unquoted`, which re-reads from
/// the same (still unconsumed) position.
pub fn extract_keyword_or_unquoted(
    buf: &mut LexBuffer,
    start: Position,
    keyword: &str,
    tag: TokenTag,
) -> Result<Token> {
    let klen = keyword.chars().count();
    let lookahead = buf.peek_chars(klen + 2)?;
    let matches_keyword =
        lookahead.len() >= klen && lookahead[..klen].iter().collect::<String>() == keyword;
    let boundary_ok = match lookahead.get(klen) {
        None => true,
        Some(&c) if is_hocon_whitespace(c) || is_forbidden(c) => true,
        Some('/') => matches!(lookahead.get(klen + 1), Some('/') | Some('*')),
        _ => false,
    };
    if matches_keyword && boundary_ok {
        buf.eat_chars(klen)?;
        Ok(Token::empty(tag, start))
    } else {
        extract_unquoted(buf, start)
    }
}

/// After the `$` has been seen (but not yet consumed), requires `{`, checks
/// for an optional `?`, and emits `OpenSub`/`OpenOptSub`. The matching
/// `CloseBrace` is an ordinary token emitted later by the top-level
/// dispatch.
pub fn extract_substitution_opener(buf: &mut LexBuffer, start: Position) -> Result<Token> {
    buf.eat_chars(1)?; // '$'
    let chars = buf.peek_chars(2)?;
    if chars.first() != Some(&'{') {
        return Err(Error::syntax(start, "expected '{' after '$'"));
    }
    if chars.get(1) == Some(&'?') {
        buf.eat_chars(2)?;
        Ok(Token::empty(TokenTag::OpenOptSub, start))
    } else {
        buf.eat_chars(1)?;
        Ok(Token::empty(TokenTag::OpenSub, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    #[test]
    fn recognizes_true_keyword() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"true}"));
        let tok = extract_keyword_or_unquoted(&mut buf, buf.position(), "true", TokenTag::True).unwrap();
        assert_eq!(tok.tag, TokenTag::True);
    }

    #[test]
    fn falls_back_to_unquoted_on_partial_match() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"truefalse "));
        let tok = extract_keyword_or_unquoted(&mut buf, buf.position(), "true", TokenTag::True).unwrap();
        assert_eq!(tok.tag, TokenTag::Unquoted);
        assert_eq!(tok.text, "truefalse");
    }

    #[test]
    fn required_substitution_opener() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"${foo}"));
        let tok = extract_substitution_opener(&mut buf, buf.position()).unwrap();
        assert_eq!(tok.tag, TokenTag::OpenSub);
    }

    #[test]
    fn optional_substitution_opener() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"${?foo}"));
        let tok = extract_substitution_opener(&mut buf, buf.position()).unwrap();
        assert_eq!(tok.tag, TokenTag::OpenOptSub);
    }

    #[test]
    fn dollar_without_brace_is_a_syntax_error() {
        let mut buf = LexBuffer::new(Input::from_bytes(b"$x"));
        assert!(extract_substitution_opener(&mut buf, buf.position()).is_err());
    }
}
