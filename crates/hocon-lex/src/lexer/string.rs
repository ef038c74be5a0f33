//! Quoted string extraction: plain JSON strings and triple-quoted
//! multi-line strings.

use crate::buffer::LexBuffer;
use crate::token::{Token, TokenTag};
use hocon_util::{Error, Position, Result};

/// Dispatches to the JSON-string or multi-line-string extractor based on
/// whether the opening quote run is one `"` or three.
pub fn extract_string(buf: &mut LexBuffer, start: Position) -> Result<Token> {
    if buf.starts_with("\"\"\"")? {
        extract_multiline_string(buf, start)
    } else {
        extract_json_string(buf, start)
    }
}

fn extract_json_string(buf: &mut LexBuffer, start: Position) -> Result<Token> {
    buf.eat_chars(1)?; // opening '"'
    let mut text = String::new();
    loop {
        let chars = buf.peek_chars(1)?;
        match chars.first() {
            None => return Err(Error::syntax(start, "unterminated string literal")),
            Some('"') => {
                buf.eat_chars(1)?;
                break;
            }
            Some('\n') => return Err(Error::syntax(start, "unterminated string literal")),
            Some('\\') => {
                buf.eat_chars(1)?;
                text.push(read_escape(buf, start)?);
            }
            Some(&c) => {
                buf.eat_chars(1)?;
                text.push(c);
            }
        }
    }
    Ok(Token::new(TokenTag::String, text, start))
}

fn read_escape(buf: &mut LexBuffer, start: Position) -> Result<char> {
    let chars = buf.peek_chars(1)?;
    let esc = chars
        .first()
        .copied()
        .ok_or_else(|| Error::syntax(start, "unterminated escape sequence"))?;
    buf.eat_chars(1)?;
    match esc {
        '\\' => Ok('\\'),
        '"' => Ok('"'),
        '/' => Ok('/'),
        'b' => Ok('\u{8}'),
        'f' => Ok('\u{C}'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        'u' => read_unicode_escape(buf, start),
        other => Err(Error::syntax(start, format!("invalid escape sequence '\\{other}'"))),
    }
}

fn read_unicode_escape(buf: &mut LexBuffer, start: Position) -> Result<char> {
    let digits = buf.peek_chars(4)?;
    if digits.len() != 4 || !digits.iter().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::syntax(start, "\\u escape requires exactly 4 hex digits"));
    }
    buf.eat_chars(4)?;
    let hex: String = digits.into_iter().collect();
    let code = u32::from_str_radix(&hex, 16).expect("digits validated as hex above");
    char::from_u32(code).ok_or_else(|| Error::syntax(start, "\\u escape is not a valid Unicode scalar value"))
}

/// HOCON closes a triple-quoted string at the *last* run of three-or-more
/// quotes: once `"""` is seen, keep consuming `"` characters past the
/// third; the run terminates the string only once followed by a
/// non-quote character (or EOF), and the run's trailing three quotes are
/// the actual closer -- any quotes before those belong to the content.
fn extract_multiline_string(buf: &mut LexBuffer, start: Position) -> Result<Token> {
    buf.eat_chars(3)?;
    let mut text = String::new();
    loop {
        let chars = buf.peek_chars(1)?;
        match chars.first() {
            None => return Err(Error::syntax(start, "unterminated \"\"\" string")),
            Some('"') => {
                let mut quote_run = String::new();
                loop {
                    let next = buf.peek_chars(1)?;
                    if next.first() == Some(&'"') {
                        quote_run.push('"');
                        buf.eat_chars(1)?;
                    } else {
                        break;
                    }
                }
                if quote_run.len() < 3 {
                    text.push_str(&quote_run);
                } else {
                    text.push_str(&quote_run[..quote_run.len() - 3]);
                    break;
                }
            }
            Some(&c) => {
                buf.eat_chars(1)?;
                text.push(c);
            }
        }
    }
    Ok(Token::new(TokenTag::String, text, start))
}
