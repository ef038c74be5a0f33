//! HOCON whitespace token extraction.

use crate::buffer::LexBuffer;
use crate::token::{ReadOptions, Token, TokenTag};
use hocon_util::Result;

/// HOCON whitespace: exactly the Unicode Zs/Zl/Zp categories, the BOM
/// (U+FEFF), and the ASCII HT/LF/VT/FF/CR and FS/GS/RS/US controls. This is
/// narrower than `char::is_whitespace` (Unicode's `White_Space` property),
/// which also matches U+0085 (NEL) -- a control character HOCON does not
/// treat as whitespace -- so the two must not be conflated here.
pub fn is_hocon_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{0009}'..='\u{000D}'
            | '\u{001C}'..='\u{001F}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Consumes a maximal run of HOCON whitespace. Emits `WsNewline` if at
/// least one U+000A was seen, else `Ws` -- the lexer never produces two
/// adjacent whitespace tokens, since a run is always coalesced here.
pub fn extract_ws(buf: &mut LexBuffer, options: ReadOptions) -> Result<Token> {
    let start = buf.position();
    let mut saw_newline = false;
    let text = buf.take_while(|c| {
        if !is_hocon_whitespace(c) {
            return false;
        }
        saw_newline |= c == '\n';
        true
    })?;
    let tag = if saw_newline { TokenTag::WsNewline } else { TokenTag::Ws };
    let payload = if options.include_ws_text { text } else { String::new() };
    Ok(Token::new(tag, payload, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    fn extract(s: &str, options: ReadOptions) -> Token {
        let mut buf = LexBuffer::new(Input::from_bytes(s.as_bytes()));
        extract_ws(&mut buf, options).unwrap()
    }

    #[test]
    fn plain_spaces_are_ws() {
        let tok = extract("   x", ReadOptions::default());
        assert_eq!(tok.tag, TokenTag::Ws);
        assert_eq!(tok.text, "   ");
    }

    #[test]
    fn a_newline_makes_it_ws_newline() {
        let tok = extract(" \n x", ReadOptions::default());
        assert_eq!(tok.tag, TokenTag::WsNewline);
    }

    #[test]
    fn text_is_empty_when_not_requested() {
        let options = ReadOptions { include_ws_text: false, include_comment_text: true };
        let tok = extract("   x", options);
        assert_eq!(tok.text, "");
        assert_eq!(tok.tag, TokenTag::Ws);
    }

    #[test]
    fn ascii_separator_controls_count_as_whitespace() {
        assert!(is_hocon_whitespace('\u{1C}'));
        assert!(is_hocon_whitespace('\u{FEFF}'));
        assert!(!is_hocon_whitespace('a'));
    }

    #[test]
    fn nel_is_not_hocon_whitespace() {
        assert!(!is_hocon_whitespace('\u{0085}'));
    }
}
