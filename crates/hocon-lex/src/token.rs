//! Token types produced by the lexer.

use hocon_util::Position;

/// The tag of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTag {
    Invalid,
    Eof,
    Ws,
    WsNewline,
    Comment,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    Comma,
    Equal,
    PlusEqual,
    Colon,
    OpenSub,
    OpenOptSub,
    True,
    False,
    Null,
    Number,
    Unquoted,
    String,
}

impl TokenTag {
    /// Whether this tag may appear inside a key (`parse_key`'s token set).
    pub fn is_key_token(self) -> bool {
        matches!(
            self,
            TokenTag::True
                | TokenTag::False
                | TokenTag::Null
                | TokenTag::Number
                | TokenTag::Unquoted
                | TokenTag::String
        )
    }

    /// Whether this tag may start a value element.
    pub fn is_value_start(self) -> bool {
        self.is_key_token()
            || matches!(
                self,
                TokenTag::OpenSub | TokenTag::OpenOptSub | TokenTag::OpenBrace | TokenTag::OpenSquare
            )
    }

    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenTag::Ws | TokenTag::WsNewline | TokenTag::Comment)
    }
}

/// A single lexed token: its tag, optional decoded text payload (always
/// valid UTF-8), and the source position where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tag: TokenTag,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(tag: TokenTag, text: String, position: Position) -> Self {
        Self { tag, text, position }
    }

    /// A token with no text payload (punctuation, keywords, EOF).
    pub fn empty(tag: TokenTag, position: Position) -> Self {
        Self { tag, text: String::new(), position }
    }
}

/// An ordered, growable sequence of tokens: used for the parser's
/// lookahead buffer and for buffering multi-token keys, path expressions,
/// and whitespace runs.
pub type TokenArray = Vec<Token>;

/// Knobs controlling whether whitespace/comment tokens carry their raw
/// text (newline-significance is preserved either way).
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub include_ws_text: bool,
    pub include_comment_text: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { include_ws_text: true, include_comment_text: true }
    }
}
