// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::Pos;

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Pos,
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Integer literal
    Int(i64),
    /// String literal, raw text between the quotes
    String(String),
    /// Boolean literal
    Bool(bool),
    /// Variable reference
    Ident(String),
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Prefix operation
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Function call in expression position
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// Parenthesized expression, kept so the output mirrors the source
    Grouping(Box<Expr>),
    /// Built-in function (`input`, `abs`, ...). Only `input` may omit its argument.
    Builtin {
        func: Builtin,
        arg: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn int(value: i64, pos: Pos) -> Self {
        Self::new(ExprKind::Int(value), pos)
    }

    pub fn string(value: impl Into<String>, pos: Pos) -> Self {
        Self::new(ExprKind::String(value.into()), pos)
    }

    pub fn bool(value: bool, pos: Pos) -> Self {
        Self::new(ExprKind::Bool(value), pos)
    }

    pub fn ident(name: impl Into<String>, pos: Pos) -> Self {
        Self::new(ExprKind::Ident(name.into()), pos)
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr, pos: Pos) -> Self {
        Self::new(
            ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) },
            pos,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, pos: Pos) -> Self {
        Self::new(ExprKind::Unary { op, operand: Box::new(operand) }, pos)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>, pos: Pos) -> Self {
        Self::new(ExprKind::Call { name: name.into(), args }, pos)
    }

    pub fn grouping(inner: Expr, pos: Pos) -> Self {
        Self::new(ExprKind::Grouping(Box::new(inner)), pos)
    }

    pub fn builtin(func: Builtin, arg: Option<Expr>, pos: Pos) -> Self {
        Self::new(ExprKind::Builtin { func, arg: arg.map(Box::new) }, pos)
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self.kind, ExprKind::String(_))
    }
}

/// Binary operators, lowest precedence group first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    Ne,
    // Comparison
    Lt,
    Gt,
    Le,
    Ge,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// Operator text, identical in Lamo and C.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical not (!)
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Built-in functions, spelled as keywords in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Builtin {
    /// Read a line from stdin, with an optional prompt
    Input,
    /// Does the value look like an integer?
    IsNumber,
    /// Is the value a string?
    IsString,
    /// Terminate the program
    Exit,
    /// Absolute value
    Abs,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Input => "input",
            Builtin::IsNumber => "isnumber",
            Builtin::IsString => "isstring",
            Builtin::Exit => "exit",
            Builtin::Abs => "abs",
        }
    }
}
