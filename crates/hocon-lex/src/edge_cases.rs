//! Edge-case tests for the lexer, covering the invariants in the tree's
//! testable-properties section: encoding rejection, coalesced whitespace,
//! unterminated literals, and the multi-line string closing rule.

#[cfg(test)]
mod tests {
    use crate::{Input, Lexer, ReadOptions, Token, TokenTag};
    use hocon_util::Handler;

    fn lex_all(source: &[u8]) -> hocon_util::Result<Vec<Token>> {
        let handler = Handler::new();
        Lexer::new(Input::from_bytes(source), ReadOptions::default(), &handler).collect()
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert_eq!(lex_all(b"").unwrap(), Vec::new());
    }

    #[test]
    fn whitespace_runs_are_coalesced_into_one_token() {
        let toks = lex_all(b"a    \t\t  b").unwrap();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[1].tag, TokenTag::Ws);
    }

    #[test]
    fn lone_trailing_quote_is_unterminated() {
        assert!(lex_all(br#""abc"#).is_err());
    }

    #[test]
    fn unterminated_block_comment_reports_syntax_error() {
        let err = lex_all(b"/* unterminated").unwrap_err();
        assert!(err.to_string().contains("without matching"));
    }

    #[test]
    fn overlong_nul_is_invalid_encoding() {
        let err = lex_all(&[0xC0, 0x80]).unwrap_err();
        assert!(matches!(err, hocon_util::Error::InvalidEncoding { .. }));
    }

    #[test]
    fn bad_unicode_escape_is_a_syntax_error() {
        assert!(lex_all(br#""\uZZZZ""#).is_err());
    }

    #[test]
    fn multiline_string_absorbs_extra_leading_quotes() {
        // `""""x"""` -- opening """ plus one extra quote, which is content,
        // then "x", then the real closing """.
        let source = "\"\"\"\"x\"\"\"";
        let toks = lex_all(source.as_bytes()).unwrap();
        assert_eq!(toks[0].tag, TokenTag::String);
        assert_eq!(toks[0].text, "\"x");
    }

    #[test]
    fn long_unquoted_run_is_a_single_token() {
        let name = "a".repeat(10_000);
        let toks = lex_all(name.as_bytes()).unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].text, name);
    }

    #[test]
    fn dollar_brace_question_mark_is_optional_substitution() {
        let toks = lex_all(b"${?x}").unwrap();
        assert_eq!(toks[0].tag, TokenTag::OpenOptSub);
    }
}
