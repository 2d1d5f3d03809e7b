// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions and the pull interface the parser consumes.

use crate::{Pos, Span};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. For strings this is the raw text between
    /// the quotes, escapes untouched. Empty for end of input.
    pub lexeme: String,
    pub span: Span,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span, pos: Pos) -> Self {
        Self { kind, lexeme: lexeme.into(), span, pos }
    }

    pub fn eof(offset: usize, pos: Pos) -> Self {
        Self::new(TokenKind::Eof, "", Span::point(offset), pos)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// How the token is quoted in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::String => format!("\"{}\"", self.lexeme),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Keywords
    Let,
    Fn,
    Return,
    If,
    Else,
    While,
    For,
    Print,
    Input,
    IsNumber,
    IsString,
    Exit,
    Abs,
    True,
    False,

    // Literals & identifiers
    Ident,
    Int,
    String,

    // Operators
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    Bang,
    PlusEq,
    MinusEq,
    PlusPlus,
    MinusMinus,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semi,
    Colon,

    // Special
    Eof,
    Unknown,
}

impl TokenKind {
    /// Human-readable name used in "expected X" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Let => "'let'",
            TokenKind::Fn => "'fn'",
            TokenKind::Return => "'return'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Print => "'print'",
            TokenKind::Input => "'input'",
            TokenKind::IsNumber => "'isnumber'",
            TokenKind::IsString => "'isstring'",
            TokenKind::Exit => "'exit'",
            TokenKind::Abs => "'abs'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",

            TokenKind::Ident => "a name",
            TokenKind::Int => "a number",
            TokenKind::String => "a string",

            TokenKind::Eq => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",

            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::Colon => "':'",

            TokenKind::Eof => "end of file",
            TokenKind::Unknown => "an unknown character",
        }
    }

    /// All reserved words, for did-you-mean suggestions.
    pub const KEYWORDS: &'static [&'static str] = &[
        "let", "fn", "return", "if", "else", "while", "for", "print",
        "input", "isnumber", "isstring", "exit", "abs", "true", "false",
    ];
}

/// Pull-based token stream with one token of lookahead.
///
/// After the input is exhausted both methods keep returning an end-of-file
/// token.
pub trait TokenSource {
    /// Consume and return the next token.
    fn next_token(&mut self) -> Token;

    /// Return the next token without consuming it.
    fn peek_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }

    fn peek_token(&mut self) -> Token {
        (**self).peek_token()
    }
}
