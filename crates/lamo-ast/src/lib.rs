// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Lamo language.
//!
//! This crate defines the tokens and tree nodes shared between the lexer,
//! parser, and C code generator. Nodes are plain owned data: every composite
//! node owns its children, and statement sequences are ordered `Vec`s owned
//! by the enclosing block or program.

pub mod span;
pub mod token;
pub mod expr;
pub mod stmt;
pub mod decl;

pub use span::{LineMap, Pos, Span};
