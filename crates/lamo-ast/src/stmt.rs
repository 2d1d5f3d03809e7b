// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::decl::FnDecl;
use crate::expr::Expr;
use crate::Pos;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Pos,
}

/// The kind of statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// `let name = init;`
    VarDecl {
        name: String,
        init: Expr,
    },
    /// `fn name(params) { ... }`, top level only
    FnDecl(FnDecl),
    /// `if (cond) { ... } else ...`
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Option<ElseBranch>,
    },
    /// `while (cond) { ... }`
    While {
        cond: Expr,
        body: Block,
    },
    /// `for (init; cond; step) { ... }`. `init` is a `VarDecl` or `Assign`,
    /// `step` is an `Assign`; either may be absent.
    For {
        init: Option<Box<Stmt>>,
        cond: Expr,
        step: Option<Box<Stmt>>,
        body: Block,
    },
    /// `return value;`
    Return(Expr),
    /// `print(value);`
    Print(Expr),
    /// `name op value;`. `x++`/`x--` arrive here already rewritten to `x = x + 1`/`x = x - 1`.
    Assign {
        name: String,
        op: AssignOp,
        value: Expr,
    },
    /// Bare call used as a statement: `name(args);`
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// `exit(code);`
    Exit(Expr),
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn var_decl(name: impl Into<String>, init: Expr, pos: Pos) -> Self {
        Self::new(StmtKind::VarDecl { name: name.into(), init }, pos)
    }

    pub fn assign(name: impl Into<String>, op: AssignOp, value: Expr, pos: Pos) -> Self {
        Self::new(StmtKind::Assign { name: name.into(), op, value }, pos)
    }

    pub fn is_fn_decl(&self) -> bool {
        matches!(self.kind, StmtKind::FnDecl(_))
    }
}

/// `{ statement* }`. Owns its statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Pos,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, pos: Pos) -> Self {
        Self { stmts, pos }
    }
}

/// What follows `else`: a block, or another `if` for `else if` chains.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElseBranch {
    Block(Block),
    If(Box<Stmt>),
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    /// =
    Assign,
    /// +=
    AddAssign,
    /// -=
    SubAssign,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
        }
    }
}
