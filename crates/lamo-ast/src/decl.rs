// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Top-level AST nodes.

use crate::stmt::{Block, Stmt, StmtKind};
use crate::Pos;

/// A whole source file: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub decls: Vec<Stmt>,
}

impl Program {
    pub fn new(decls: Vec<Stmt>) -> Self {
        Self { decls }
    }

    /// Function declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FnDecl> {
        self.decls.iter().filter_map(|s| match &s.kind {
            StmtKind::FnDecl(f) => Some(f),
            _ => None,
        })
    }

    /// Everything that is not a function; this becomes the body of `main`.
    pub fn top_level_stmts(&self) -> impl Iterator<Item = &Stmt> {
        self.decls.iter().filter(|s| !s.is_fn_decl())
    }
}

/// A function declaration. Parameters are untyped names; duplicates are not rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub pos: Pos,
}
