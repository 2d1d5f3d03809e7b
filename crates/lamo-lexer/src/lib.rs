// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the Lamo language.
//!
//! Turns source text into tokens on demand through the
//! [`TokenSource`](lamo_ast::token::TokenSource) pull interface.

mod lexer;

pub use lexer::{tokenize, Lexer};
