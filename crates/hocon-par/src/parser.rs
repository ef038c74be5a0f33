//! The event-driven HOCON grammar: pulls tokens from `hocon_lex::Lexer`
//! and drives a `Reader`. No backtracking; every `SyntaxError` aborts the
//! parse immediately (no `goto cleanup`/recovery -- a `Result`-returning
//! call chain unwinds on its own).

use hocon_lex::{Input, Lexer, ReadOptions, Token, TokenArray, TokenTag};
use hocon_util::{Error, Handler, Position, Result};

use crate::reader::{Assignment, Format, Reader};

/// Knobs the caller sets before a parse: the lexer's text-retention flags
/// (`LexOptions`, i.e. `hocon_lex::ReadOptions`) plus the grammar's own
/// `allow_empty_value` flag (the source's hard-coded `ALLOW_EMPTY_VALUE`,
/// made user-facing here).
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    pub lex: ReadOptions,
    /// Whether a bare `,` as the first token of a value is silently
    /// accepted (an empty value) rather than a syntax error. Defaults to
    /// `true`, matching the source.
    pub allow_empty_value: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { lex: ReadOptions::default(), allow_empty_value: true }
    }
}

/// Parses `input` as `fmt` and drives `reader`. The only format currently
/// understood is `Format::Hocon`; any other value is `Error::InvalidArgument`.
/// Every error the lexer or the grammar produces is also reported to
/// `handler`, the "collaborator error sink" of spec.md §7 (default
/// stderr), before it's returned.
pub fn parse(
    input: Input<'_>,
    fmt: Format,
    reader: &mut dyn Reader,
    options: ParserOptions,
    handler: &Handler,
) -> Result<()> {
    match fmt {
        Format::Hocon => Parser::new(input, options, handler).run(reader),
    }
}

/// Owns the lexer and a small lookahead buffer of already-read tokens.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Tokens read from the lexer but not yet consumed by the grammar.
    lookahead: TokenArray,
    options: ParserOptions,
    /// Position of the most recently popped token, for error reporting
    /// when the next token is missing (e.g. unexpected EOF).
    last_position: Position,
    /// Diagnostic sink every grammar error this parser constructs is
    /// reported to (lexer errors are reported by the lexer itself, at
    /// their point of origin, so they aren't reported again here).
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(input: Input<'a>, options: ParserOptions, handler: &'a Handler) -> Self {
        Self {
            lexer: Lexer::new(input, options.lex, handler),
            lookahead: TokenArray::new(),
            options,
            last_position: Position::START,
            handler,
        }
    }

    /// Builds a `SyntaxError`/`Unimplemented` error, reports it to the
    /// handler, and returns it -- the single construction site for every
    /// grammar error this parser raises directly (as opposed to errors it
    /// merely propagates from the lexer, which are reported there).
    fn fail<T>(&self, err: Error) -> Result<T> {
        self.handler.report(&err);
        Err(err)
    }

    /// Drive `reader` through the whole top-level grammar of spec §4.3.
    pub fn run(&mut self, reader: &mut dyn Reader) -> Result<()> {
        self.skip_ws_and_comments()?;

        let opener = match self.peek_tag(0)? {
            TokenTag::OpenBrace => Some(self.pop_one()?.tag),
            TokenTag::OpenSquare => Some(self.pop_one()?.tag),
            _ => None,
        };

        match opener {
            Some(TokenTag::OpenSquare) => self.parse_array_body(reader)?,
            _ => self.parse_object_body(reader)?,
        }

        if let Some(opener) = opener {
            let closer = if opener == TokenTag::OpenSquare { TokenTag::CloseSquare } else { TokenTag::CloseBrace };
            self.expect(closer)?;
        }

        self.skip_ws_and_comments()?;
        match self.peek_tag(0)? {
            TokenTag::Eof => Ok(()),
            _ => {
                let tok = self.peek_tok(0)?.clone();
                self.fail(Error::syntax(tok.position, format!("unexpected trailing token {:?}", tok.tag)))
            }
        }
    }

    /// `{ key = value ... }`, or the implicit root object when no brace
    /// was consumed by the caller.
    fn parse_object_body(&mut self, reader: &mut dyn Reader) -> Result<()> {
        if !reader.obj_start() {
            return Err(self.aborted());
        }
        loop {
            self.skip_ws_and_comments()?;
            match self.peek_tag(0)? {
                TokenTag::CloseBrace | TokenTag::Eof => break,
                _ => {}
            }

            if self.peek_is_include()? {
                let tok = self.peek_tok(0)?.clone();
                let message = self.include_message()?;
                return self.fail(Error::unimplemented(tok.position, message));
            }

            let key_toks = self.parse_key()?;
            let sep = self.parse_kv_sep()?;
            if !reader.key_val_start(key_toks, sep) {
                return Err(self.aborted());
            }
            self.parse_value(reader)?;
            if !reader.key_val_end() {
                return Err(self.aborted());
            }
        }
        if !reader.obj_end() {
            return Err(self.aborted());
        }
        Ok(())
    }

    /// `[ value, value ... ]`. No keys, no separators between value and
    /// opener; elements are terminated the same way as in `parse_value`.
    fn parse_array_body(&mut self, reader: &mut dyn Reader) -> Result<()> {
        if !reader.arr_start() {
            return Err(self.aborted());
        }
        loop {
            self.skip_ws_and_comments()?;
            match self.peek_tag(0)? {
                TokenTag::CloseSquare | TokenTag::Eof => break,
                _ => {}
            }
            if !reader.val_start() {
                return Err(self.aborted());
            }
            self.parse_value(reader)?;
            if !reader.val_end() {
                return Err(self.aborted());
            }
        }
        if !reader.arr_end() {
            return Err(self.aborted());
        }
        Ok(())
    }

    /// A sequence of key tokens (`True`/`False`/`Null`/`Number`/`Unquoted`/
    /// `String`) separated by whitespace, ending when the next significant
    /// token is not a key token. May return empty (an empty key). A
    /// comment inside a key is a syntax error.
    fn parse_key(&mut self) -> Result<TokenArray> {
        let mut toks = TokenArray::new();
        self.skip_ws_and_comments()?;
        loop {
            match self.peek_tag(0)? {
                tag if tag.is_key_token() => toks.push(self.pop_one()?),
                TokenTag::Comment => {
                    let tok = self.peek_tok(0)?.clone();
                    return self.fail(Error::syntax(tok.position, "comment is not allowed inside a key"));
                }
                TokenTag::Ws | TokenTag::WsNewline => {
                    // Only keep this whitespace if a further key token
                    // follows it; otherwise it belongs to the separator.
                    if self.peek_tag(1)?.is_key_token() {
                        toks.push(self.pop_one()?);
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(toks)
    }

    /// `=`/`:` -> `Assign` (consumed). `+=` -> `Append` (consumed). `{` ->
    /// `Assign` without consuming (the object literal is the value).
    /// Anything else is a syntax error.
    fn parse_kv_sep(&mut self) -> Result<Assignment> {
        self.skip_ws_and_comments()?;
        match self.peek_tag(0)? {
            TokenTag::Equal | TokenTag::Colon => {
                self.pop_one()?;
                Ok(Assignment::Assign)
            }
            TokenTag::PlusEqual => {
                self.pop_one()?;
                Ok(Assignment::Append)
            }
            TokenTag::OpenBrace => Ok(Assignment::Assign),
            _ => {
                let pos = self.peek_tok(0)?.position;
                self.fail(Error::syntax(pos, "expected ':', '=', '+=', or '{' after key"))
            }
        }
    }

    /// A value is one or more elements, optionally whitespace-separated,
    /// forming a concatenation; the sequence ends at an explicit `,`, a
    /// semantic newline, or a closer/EOF.
    fn parse_value(&mut self, reader: &mut dyn Reader) -> Result<()> {
        let mut saw_element = false;
        loop {
            let (buffered, saw_newline) = self.accum_whitespace()?;
            match self.peek_tag(0)? {
                TokenTag::Comma => {
                    if !saw_element && !self.options.allow_empty_value {
                        let pos = self.peek_tok(0)?.position;
                        return self.fail(Error::syntax(pos, "empty value before ','"));
                    }
                    self.pop_one()?;
                    return Ok(());
                }
                _ if saw_newline => return Ok(()),
                tag if tag.is_value_start() => {
                    // Whitespace preceding the very first element is just
                    // the key-value separator's trailing space, not part
                    // of the concatenation; only whitespace *between*
                    // elements is forwarded to the reader.
                    let forward = if saw_element { buffered } else { TokenArray::new() };
                    for tok in forward {
                        if !reader.token(tok) {
                            return Err(self.aborted());
                        }
                    }
                    self.parse_element(reader)?;
                    saw_element = true;
                }
                _ => return Ok(()),
            }
        }
    }

    /// One value element: a scalar token, a substitution, or a nested
    /// object/array.
    fn parse_element(&mut self, reader: &mut dyn Reader) -> Result<()> {
        match self.peek_tag(0)? {
            TokenTag::True | TokenTag::False | TokenTag::Null | TokenTag::Number | TokenTag::Unquoted | TokenTag::String => {
                let tok = self.pop_one()?;
                if !reader.token(tok) {
                    return Err(self.aborted());
                }
                Ok(())
            }
            TokenTag::OpenSub | TokenTag::OpenOptSub => {
                let opener = self.pop_one()?;
                let optional = opener.tag == TokenTag::OpenOptSub;
                let path = self.parse_key()?;
                if !reader.var_sub(path, optional) {
                    return Err(self.aborted());
                }
                self.expect(TokenTag::CloseBrace)?;
                Ok(())
            }
            TokenTag::OpenBrace => {
                self.pop_one()?;
                self.parse_object_body(reader)?;
                self.expect(TokenTag::CloseBrace)?;
                Ok(())
            }
            TokenTag::OpenSquare => {
                self.pop_one()?;
                self.parse_array_body(reader)?;
                self.expect(TokenTag::CloseSquare)?;
                Ok(())
            }
            tag => {
                let pos = self.peek_tok(0)?.position;
                self.fail(Error::syntax(pos, format!("unexpected token {tag:?} in value position")))
            }
        }
    }

    /// Reads and buffers `Ws`/`WsNewline`/`Comment` tokens until a
    /// non-whitespace token is peeked. Comments here are a syntax error
    /// (mid-concatenation comments are rejected, same as inside a key).
    /// Returns the buffered tokens and whether any newline was seen.
    fn accum_whitespace(&mut self) -> Result<(TokenArray, bool)> {
        let mut buffered = TokenArray::new();
        let mut saw_newline = false;
        loop {
            match self.peek_tag(0)? {
                TokenTag::WsNewline => {
                    saw_newline = true;
                    buffered.push(self.pop_one()?);
                }
                TokenTag::Ws => buffered.push(self.pop_one()?),
                TokenTag::Comment => {
                    let pos = self.peek_tok(0)?.position;
                    return self.fail(Error::syntax(pos, "comment is not allowed inside a value concatenation"));
                }
                _ => break,
            }
        }
        Ok((buffered, saw_newline))
    }

    /// Skip whitespace and comments outside of a key or value (between
    /// top-level entries, around openers/closers).
    fn skip_ws_and_comments(&mut self) -> Result<()> {
        while matches!(self.peek_tag(0)?, TokenTag::Ws | TokenTag::WsNewline | TokenTag::Comment) {
            self.pop_one()?;
        }
        Ok(())
    }

    fn peek_is_include(&mut self) -> Result<bool> {
        Ok(self.peek_tag(0)? == TokenTag::Unquoted && self.peek_tok(0)?.text == "include")
    }

    /// Builds a diagnostic-quality message naming which `include` form was
    /// seen (`"path"`, `url(...)`, `file(...)`) without implementing
    /// inclusion itself.
    fn include_message(&mut self) -> Result<String> {
        self.pop_one()?; // the `include` keyword
        self.skip_ws_and_comments()?;
        let form = match self.peek_tag(0)? {
            TokenTag::String => "include \"...\"",
            TokenTag::Unquoted if self.peek_tok(0)?.text == "url" => "include url(...)",
            TokenTag::Unquoted if self.peek_tok(0)?.text == "file" => "include file(...)",
            _ => "include",
        };
        Ok(format!("{form} is not supported (include resolution is out of scope)"))
    }

    /// Ensure the lookahead buffer has at least `n + 1` tokens, reading
    /// from the lexer as needed.
    fn fill(&mut self, n: usize) -> Result<()> {
        while self.lookahead.len() <= n {
            let tok = match self.lexer.next() {
                Some(result) => result?,
                None => Token::empty(TokenTag::Eof, self.lexer.position()),
            };
            let is_eof = tok.tag == TokenTag::Eof;
            self.lookahead.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(())
    }

    fn peek_tok(&mut self, n: usize) -> Result<&Token> {
        self.fill(n)?;
        Ok(self.lookahead.get(n).unwrap_or_else(|| self.lookahead.last().expect("fill always leaves Eof")))
    }

    fn peek_tag(&mut self, n: usize) -> Result<TokenTag> {
        Ok(self.peek_tok(n)?.tag)
    }

    fn pop_one(&mut self) -> Result<Token> {
        self.fill(0)?;
        let tok = if self.lookahead.is_empty() {
            Token::empty(TokenTag::Eof, self.lexer.position())
        } else {
            self.lookahead.remove(0)
        };
        self.last_position = tok.position;
        Ok(tok)
    }

    fn expect(&mut self, tag: TokenTag) -> Result<Token> {
        self.skip_ws_and_comments()?;
        if self.peek_tag(0)? == tag {
            self.pop_one()
        } else {
            let tok = self.peek_tok(0)?.clone();
            self.fail(Error::syntax(tok.position, format!("expected {tag:?}, found {:?}", tok.tag)))
        }
    }

    fn aborted(&self) -> Error {
        let err = Error::ReaderAborted(self.last_position);
        self.handler.report(&err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sink::TreeReader;
    use crate::value::Tree;

    fn parse_tree(source: &str) -> Tree {
        let mut sink = TreeReader::new();
        let handler = Handler::new();
        parse(Input::from_bytes(source.as_bytes()), Format::Hocon, &mut sink, ParserOptions::default(), &handler).unwrap();
        sink.finish()
    }

    #[test]
    fn flat_object_round_trips_in_order() {
        let tree = parse_tree(r#"{"a":1,"b":2}"#);
        let Tree::Object(obj) = tree else { panic!("expected object") };
        assert_eq!(obj.entries[0].key, "a");
        assert_eq!(obj.entries[1].key, "b");
    }

    #[test]
    fn implicit_root_and_newline_separation() {
        let tree = parse_tree("a = 1\nb = 2\n");
        let Tree::Object(obj) = tree else { panic!("expected object") };
        assert_eq!(obj.entries.len(), 2);
    }

    #[test]
    fn duplicate_assign_keeps_the_later_value() {
        let tree = parse_tree("a = 1\na = 2\n");
        let Tree::Object(obj) = tree else { panic!("expected object") };
        assert_eq!(obj.entries.len(), 1);
        assert_eq!(obj.entries[0].key, "a");
    }

    #[test]
    fn unterminated_block_comment_is_a_syntax_error() {
        let mut sink = TreeReader::new();
        let handler = Handler::new();
        let err = parse(Input::from_bytes(b"/* unterminated"), Format::Hocon, &mut sink, ParserOptions::default(), &handler)
            .unwrap_err();
        assert!(err.to_string().contains("without matching"));
    }

    #[test]
    fn include_is_unimplemented_but_names_the_form() {
        let mut sink = TreeReader::new();
        let handler = Handler::new();
        let err = parse(Input::from_bytes(b"include \"foo.conf\"\n"), Format::Hocon, &mut sink, ParserOptions::default(), &handler)
            .unwrap_err();
        assert!(matches!(err, Error::Unimplemented { .. }));
        assert!(err.to_string().contains("include \"...\""));
    }

    #[test]
    fn a_grammar_error_is_also_recorded_by_the_handler() {
        let mut sink = TreeReader::new();
        let handler = Handler::new();
        let _ = parse(Input::from_bytes(b"a 1\n"), Format::Hocon, &mut sink, ParserOptions::default(), &handler);
        assert!(handler.has_errors());
    }
}
