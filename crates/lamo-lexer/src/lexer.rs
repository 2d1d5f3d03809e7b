// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use logos::Logos;
use lamo_ast::token::{Token, TokenKind, TokenSource};
use lamo_ast::{LineMap, Span};

/// Raw token type for logos; lexemes are sliced out in a second pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\x0B\x0C]+")]
enum RawToken {
    // === Keywords ===
    #[token("let")]
    Let,
    #[token("fn")]
    Fn,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("print")]
    Print,
    #[token("input")]
    Input,
    #[token("isnumber")]
    IsNumber,
    #[token("isstring")]
    IsString,
    #[token("exit")]
    Exit,
    #[token("abs")]
    Abs,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Two-character operators ===
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // === Single-character operators ===
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,

    // === Comments (skipped) ===
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // === Literals ===
    #[regex(r"[0-9]+")]
    Int,

    /// Payload is the byte length of the string body.
    #[token("\"", string_body)]
    String(usize),

    // === Identifier (keywords above win on exact matches) ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip a block comment. Comments do not nest; an unterminated one eats the
/// rest of the input.
fn block_comment(lexer: &mut logos::Lexer<RawToken>) -> logos::Skip {
    let remainder = lexer.remainder();
    let consumed = match remainder.find("*/") {
        Some(end) => end + 2,
        None => remainder.len(),
    };
    lexer.bump(consumed);
    logos::Skip
}

/// Scan a string body after the opening quote.
///
/// Only `\"` is treated specially (it does not close the string); every
/// other byte, backslashes included, is kept verbatim. A missing closing
/// quote runs the string to end of input.
fn string_body(lexer: &mut logos::Lexer<RawToken>) -> Option<usize> {
    let bytes = lexer.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) == Some(&b'"') => i += 2,
            b'"' => {
                lexer.bump(i + 1);
                return Some(i);
            }
            _ => i += 1,
        }
    }
    lexer.bump(bytes.len());
    Some(bytes.len())
}

/// The lexer for Lamo source code.
///
/// Produces tokens lazily. Unrecognized characters become
/// [`TokenKind::Unknown`] tokens; the lexer itself never fails.
pub struct Lexer<'a> {
    source: &'a str,
    raw: logos::Lexer<'a, RawToken>,
    line_map: LineMap,
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            raw: RawToken::lexer(source),
            line_map: LineMap::new(source),
            peeked: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    fn lex(&mut self) -> Token {
        let Some(result) = self.raw.next() else {
            let end = self.source.len();
            return Token::eof(end, self.line_map.position(end));
        };

        let range = self.raw.span();
        let slice = self.raw.slice();
        let span = Span::new(range.start, range.end);
        let pos = self.line_map.position(range.start);

        let (kind, lexeme) = match result {
            Ok(RawToken::String(len)) => (TokenKind::String, &slice[1..1 + len]),
            Ok(raw) => (convert(raw), slice),
            Err(()) => (TokenKind::Unknown, slice),
        };

        Token::new(kind, lexeme, span, pos)
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        match self.peeked.take() {
            Some(tok) => tok,
            None => self.lex(),
        }
    }

    fn peek_token(&mut self) -> Token {
        match &self.peeked {
            Some(tok) => tok.clone(),
            None => {
                let tok = self.lex();
                self.peeked = Some(tok.clone());
                tok
            }
        }
    }
}

/// Tokenize the entire source. The last token is always end of file.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let done = tok.is(TokenKind::Eof);
        tokens.push(tok);
        if done {
            return tokens;
        }
    }
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Let => TokenKind::Let,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Print => TokenKind::Print,
        RawToken::Input => TokenKind::Input,
        RawToken::IsNumber => TokenKind::IsNumber,
        RawToken::IsString => TokenKind::IsString,
        RawToken::Exit => TokenKind::Exit,
        RawToken::Abs => TokenKind::Abs,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,

        RawToken::Eq => TokenKind::Eq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Bang => TokenKind::Bang,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Colon => TokenKind::Colon,

        RawToken::Int => TokenKind::Int,
        RawToken::String(_) => TokenKind::String,
        RawToken::Ident => TokenKind::Ident,

        // Skipped by logos, never produced
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Unknown,
    }
}
