//! Top-level lexer dispatch.
//!
//! A [`Lexer`] owns a buffered input window and turns it into a stream of
//! tokens. It holds no grammar state between tokens -- every contextual
//! decision (what an unquoted run means at a given grammar position, say)
//! belongs to the parser, not here.

use crate::buffer::LexBuffer;
use crate::input::Input;
use crate::lexer::comment::{extract_block_comment, extract_line_comment};
use crate::lexer::number::extract_number;
use crate::lexer::punctuation::{extract_keyword_or_unquoted, extract_substitution_opener};
use crate::lexer::string::extract_string;
use crate::lexer::unquoted::{extract_unquoted, is_forbidden};
use crate::lexer::whitespace::{extract_ws, is_hocon_whitespace};
use crate::token::{ReadOptions, Token, TokenTag};
use hocon_util::{Error, Handler, Position, Result};

pub struct Lexer<'a> {
    buf: LexBuffer<'a>,
    options: ReadOptions,
    /// Diagnostic sink every `read_tok` error is reported to before it's
    /// returned, per spec.md §7's "accompanied by a diagnostic message
    /// written to the collaborator error sink".
    handler: &'a Handler,
}

impl<'a> Lexer<'a> {
    pub fn new(input: Input<'a>, options: ReadOptions, handler: &'a Handler) -> Self {
        Self { buf: LexBuffer::new(input), options, handler }
    }

    /// The position of the next unread character.
    pub fn position(&self) -> Position {
        self.buf.position()
    }

    pub fn options(&self) -> ReadOptions {
        self.options
    }

    /// Reads the next token, dispatching on a single character of
    /// lookahead (two for `/`, which disambiguates a comment opener from
    /// an unquoted run starting with a slash). Reports any error to the
    /// handler before returning it.
    pub fn read_tok(&mut self) -> Result<Token> {
        let result = self.read_tok_inner();
        if let Err(ref err) = result {
            self.handler.report(err);
        }
        result
    }

    fn read_tok_inner(&mut self) -> Result<Token> {
        let start = self.buf.position();
        let chars = self.buf.peek_chars(2)?;
        let Some(&first) = chars.first() else {
            return Ok(Token::empty(TokenTag::Eof, start));
        };

        if is_hocon_whitespace(first) {
            return extract_ws(&mut self.buf, self.options);
        }

        match first {
            '"' => extract_string(&mut self.buf, start),
            '{' => self.single(TokenTag::OpenBrace, start),
            '}' => self.single(TokenTag::CloseBrace, start),
            '(' => self.single(TokenTag::OpenParen, start),
            ')' => self.single(TokenTag::CloseParen, start),
            '[' => self.single(TokenTag::OpenSquare, start),
            ']' => self.single(TokenTag::CloseSquare, start),
            ',' => self.single(TokenTag::Comma, start),
            ':' => self.single(TokenTag::Colon, start),
            '=' => self.single(TokenTag::Equal, start),
            '+' => {
                if chars.get(1) == Some(&'=') {
                    self.buf.eat_bytes(2)?;
                    Ok(Token::empty(TokenTag::PlusEqual, start))
                } else {
                    Err(Error::syntax(start, "expected '=' after '+'"))
                }
            }
            '-' => extract_number(&mut self.buf, start),
            c if c.is_ascii_digit() => extract_number(&mut self.buf, start),
            't' => extract_keyword_or_unquoted(&mut self.buf, start, "true", TokenTag::True),
            'f' => extract_keyword_or_unquoted(&mut self.buf, start, "false", TokenTag::False),
            'n' => extract_keyword_or_unquoted(&mut self.buf, start, "null", TokenTag::Null),
            '#' => extract_line_comment(&mut self.buf, start, self.options),
            '/' => match chars.get(1) {
                Some('/') => extract_line_comment(&mut self.buf, start, self.options),
                Some('*') => extract_block_comment(&mut self.buf, start, self.options),
                _ => extract_unquoted(&mut self.buf, start),
            },
            '$' => extract_substitution_opener(&mut self.buf, start),
            c if is_forbidden(c) => Err(Error::syntax(start, format!("unexpected character '{c}'"))),
            _ => extract_unquoted(&mut self.buf, start),
        }
    }

    /// Consumes one single-byte ASCII punctuation character already
    /// identified by `read_tok`'s dispatch.
    fn single(&mut self, tag: TokenTag, start: Position) -> Result<Token> {
        self.buf.eat_bytes(1)?;
        Ok(Token::empty(tag, start))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_tok() {
            Ok(tok) if tok.tag == TokenTag::Eof => None,
            other => Some(other),
        }
    }
}
