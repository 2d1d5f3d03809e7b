// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use lamo_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on what was found instead.
pub fn for_expected(expected: TokenKind, found: TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Statement terminator
        (TokenKind::Semi, TokenKind::Eof) => Some("the last statement is missing its ';'"),
        (TokenKind::Semi, _) => Some("end statements with ';'"),

        // Block hints
        (TokenKind::LBrace, _) => Some("blocks start with '{'"),
        (TokenKind::RBrace, TokenKind::Eof) => Some("every '{' needs a matching '}'"),

        // Parentheses hints
        (TokenKind::LParen, _) => Some("conditions and calls need parentheses"),
        (TokenKind::RParen, TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        (TokenKind::RParen, TokenKind::Semi) => Some("add ')' before the ';'"),

        // Declaration hints
        (TokenKind::Eq, TokenKind::Eq) => None,
        (TokenKind::Eq, _) => Some("variables need an initial value: let name = value;"),
        (TokenKind::Ident, TokenKind::Int) => Some("names can't start with a number"),
        (TokenKind::Ident, k) if TokenKind::KEYWORDS.contains(&keyword_text(k)) => {
            Some("keywords can't be used as names")
        }
        (TokenKind::Ident, _) => Some("names start with a letter or '_'"),

        _ => None,
    }
}

/// Hint for a token that cannot start an expression.
pub fn for_invalid_expression(found: TokenKind) -> Option<&'static str> {
    match found {
        TokenKind::Semi | TokenKind::RParen => Some("the expression is incomplete"),
        TokenKind::Eq => Some("use '==' to compare values"),
        TokenKind::Eof => Some("the file ends in the middle of an expression"),
        TokenKind::Exit | TokenKind::Input | TokenKind::Abs => None,
        _ => Some("try a number, string, name, or function call"),
    }
}

/// Hint for an identifier statement that is neither an assignment nor a call.
pub fn for_assign_or_call(found: TokenKind) -> Option<&'static str> {
    match found {
        TokenKind::EqEq => Some("use '=' to assign, '==' only compares"),
        TokenKind::Semi => Some("a bare name does nothing; assign to it or call it"),
        _ => None,
    }
}

fn keyword_text(kind: TokenKind) -> &'static str {
    kind.display_name().trim_matches('\'')
}
