// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation: recursive descent with one token of lookahead.

use lamo_ast::decl::{FnDecl, Program};
use lamo_ast::expr::{BinOp, Builtin, Expr, ExprKind, UnaryOp};
use lamo_ast::stmt::{AssignOp, Block, ElseBranch, Stmt, StmtKind};
use lamo_ast::token::{Token, TokenKind, TokenSource};
use lamo_ast::{Pos, Span};
use thiserror::Error;

/// How deep blocks, `else if` chains, parentheses and unary operators may
/// nest, and how tall a chain of binary operators may grow, before parsing
/// stops.
pub const MAX_NESTING: usize = 256;

/// The parser for Lamo source code.
///
/// Pulls tokens from a [`TokenSource`] and stops at the first error.
pub struct Parser<S: TokenSource> {
    tokens: S,
    current: Token,
    /// Block nesting depth; `fn` is only legal at depth zero.
    depth: usize,
    /// Recursion budget used against `MAX_NESTING`.
    nesting: usize,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(mut tokens: S) -> Self {
        let current = tokens.next_token();
        Self { tokens, current, depth: 0, nesting: 0 }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    fn at_end(&self) -> bool {
        self.current.is(TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Token {
        let next = self.tokens.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(kind))
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Pos), ParseError> {
        let tok = self.expect(TokenKind::Ident)?;
        Ok((tok.lexeme, tok.pos))
    }

    /// Take one level of the nesting budget.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::at(ParseErrorKind::TooDeeplyNested { limit: MAX_NESTING }, &self.current)
                .with_hint("split the code into smaller functions or intermediate `let` bindings"));
        }
        self.nesting += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn error_expected(&self, expected: TokenKind) -> ParseError {
        if self.check(TokenKind::Unknown) {
            return ParseError::unknown_char(&self.current);
        }
        let kind = ParseErrorKind::Expected {
            expected: expected.display_name(),
            found: self.current.describe(),
        };
        ParseError::at(kind, &self.current)
            .with_hint_opt(crate::hints::for_expected(expected, self.current_kind()))
    }

    // =========================================================================
    // Program & Statements
    // =========================================================================

    /// Parse a whole program: top-level statements until end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut decls = Vec::new();
        while !self.at_end() {
            if let Some(stmt) = self.parse_statement()? {
                decls.push(stmt);
            }
        }
        Ok(Program::new(decls))
    }

    /// Parse one statement.
    ///
    /// Returns `Ok(None)` when the current token cannot start a statement;
    /// that token is skipped.
    pub fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let stmt = match self.current_kind() {
            TokenKind::Let => self.parse_let()?,
            TokenKind::Fn => self.parse_fn()?,
            TokenKind::Ident => self.parse_ident_stmt()?,
            TokenKind::Print => self.parse_print()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Exit => self.parse_exit()?,
            TokenKind::Unknown => return Err(ParseError::unknown_char(&self.current)),
            TokenKind::Eof => return Ok(None),
            _ => {
                self.advance();
                return Ok(None);
            }
        };
        Ok(Some(stmt))
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.enter()?;
        let open = self.expect(TokenKind::LBrace)?;
        self.depth += 1;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            if let Some(stmt) = self.parse_statement()? {
                stmts.push(stmt);
            }
        }
        self.depth -= 1;
        self.expect(TokenKind::RBrace)?;
        self.leave();
        Ok(Block::new(stmts, open.pos))
    }

    /// `let name = expr` without the terminator; shared with `for` headers.
    fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Let)?;
        let (name, pos) = self.expect_ident()?;
        self.expect(TokenKind::Eq)?;
        let init = self.parse_expression()?;
        Ok(Stmt::var_decl(name, init, pos))
    }

    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let stmt = self.parse_var_decl()?;
        self.expect(TokenKind::Semi)?;
        Ok(stmt)
    }

    fn parse_fn(&mut self) -> Result<Stmt, ParseError> {
        let fn_tok = self.expect(TokenKind::Fn)?;
        if self.depth > 0 {
            let name = if self.check(TokenKind::Ident) {
                self.current.lexeme.clone()
            } else {
                String::new()
            };
            return Err(ParseError::new(
                ParseErrorKind::NestedFunction { name },
                fn_tok.span,
                fn_tok.pos,
            )
            .with_hint("move the function to the top level of the file"));
        }

        let (name, pos) = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) && !self.at_end() {
            let (param, _) = self.expect_ident()?;
            params.push(param);
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(Stmt::new(StmtKind::FnDecl(FnDecl { name, params, body, pos }), pos))
    }

    /// Statements that start with a name: calls, assignments, `++`/`--`.
    fn parse_ident_stmt(&mut self) -> Result<Stmt, ParseError> {
        let (name, pos) = self.expect_ident()?;

        if self.check(TokenKind::LParen) {
            let args = self.parse_args()?;
            self.expect(TokenKind::Semi)?;
            return Ok(Stmt::new(StmtKind::Call { name, args }, pos));
        }

        let stmt = self.parse_assignment(name, pos)?;
        self.expect(TokenKind::Semi)?;
        Ok(stmt)
    }

    /// The operator and right-hand side of an assignment whose target has
    /// already been consumed. `x++`/`x--` become `x = x + 1`/`x = x - 1`,
    /// every node stamped with the target's position.
    fn parse_assignment(&mut self, name: String, pos: Pos) -> Result<Stmt, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = if self.check(TokenKind::PlusPlus) { BinOp::Add } else { BinOp::Sub };
                self.advance();
                let value = Expr::binary(op, Expr::ident(name.clone(), pos), Expr::int(1, pos), pos);
                return Ok(Stmt::assign(name, AssignOp::Assign, value, pos));
            }
            TokenKind::Unknown => return Err(ParseError::unknown_char(&self.current)),
            found => {
                let kind = ParseErrorKind::ExpectedAssignOrCall {
                    name,
                    found: self.current.describe(),
                };
                return Err(ParseError::at(kind, &self.current)
                    .with_hint_opt(crate::hints::for_assign_or_call(found)));
            }
        };
        self.advance();
        let value = self.parse_expression()?;
        Ok(Stmt::assign(name, op, value, pos))
    }

    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        let print = self.expect(TokenKind::Print)?;
        self.expect(TokenKind::LParen)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Print(value), print.pos))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let if_tok = self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            if self.check(TokenKind::If) {
                self.enter()?;
                let nested = self.parse_if()?;
                self.leave();
                Some(ElseBranch::If(Box::new(nested)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(Stmt::new(StmtKind::If { cond, then_branch, else_branch }, if_tok.pos))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let while_tok = self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::new(StmtKind::While { cond, body }, while_tok.pos))
    }

    /// `for (init; cond; step) block`. The condition is required; init and
    /// step may be empty.
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let for_tok = self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = match self.current_kind() {
            TokenKind::Let => Some(Box::new(self.parse_var_decl()?)),
            TokenKind::Ident => Some(Box::new(self.parse_for_assignment()?)),
            _ => None,
        };
        self.expect(TokenKind::Semi)?;

        let cond = self.parse_expression()?;
        self.expect(TokenKind::Semi)?;

        let step = if self.check(TokenKind::Ident) {
            Some(Box::new(self.parse_for_assignment()?))
        } else {
            None
        };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(Stmt::new(StmtKind::For { init, cond, step, body }, for_tok.pos))
    }

    fn parse_for_assignment(&mut self) -> Result<Stmt, ParseError> {
        let (name, pos) = self.expect_ident()?;
        self.parse_assignment(name, pos)
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let ret = self.expect(TokenKind::Return)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Return(value), ret.pos))
    }

    fn parse_exit(&mut self) -> Result<Stmt, ParseError> {
        let exit = self.expect(TokenKind::Exit)?;
        self.expect(TokenKind::LParen)?;
        let code = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Exit(code), exit.pos))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse an expression, starting at the lowest precedence level.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let expr = self.parse_or()?;
        self.leave();
        Ok(expr)
    }

    /// Fold `next (op next)*` into a left-deep tree. Each binary node is
    /// stamped with its operator's position. The height of the folded tree
    /// is capped at `MAX_NESTING`.
    fn parse_binary_level(
        &mut self,
        ops: &[(TokenKind, BinOp)],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        let mut left_depth = None;
        while let Some(&(_, op)) = ops.iter().find(|(kind, _)| self.check(*kind)) {
            let op_tok = self.advance();
            let right = next(self)?;
            let depth = left_depth.unwrap_or_else(|| tree_depth(&left)).max(tree_depth(&right)) + 1;
            if depth > MAX_NESTING {
                return Err(ParseError::at(ParseErrorKind::TooDeeplyNested { limit: MAX_NESTING }, &op_tok)
                    .with_hint("split the expression with intermediate `let` bindings"));
            }
            left_depth = Some(depth);
            left = Expr::binary(op, left, right, op_tok.pos);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[(TokenKind::PipePipe, BinOp::Or)], Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[(TokenKind::AmpAmp, BinOp::And)], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::EqEq, BinOp::Eq), (TokenKind::BangEq, BinOp::Ne)],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[
                (TokenKind::Lt, BinOp::Lt),
                (TokenKind::Gt, BinOp::Gt),
                (TokenKind::LtEq, BinOp::Le),
                (TokenKind::GtEq, BinOp::Ge),
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
            Self::parse_factor,
        )
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[
                (TokenKind::Star, BinOp::Mul),
                (TokenKind::Slash, BinOp::Div),
                (TokenKind::Percent, BinOp::Mod),
            ],
            Self::parse_unary,
        )
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        self.enter()?;
        let op_tok = self.advance();
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expr::unary(op, operand, op_tok.pos))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let pos = self.current.pos;
        match self.current_kind() {
            TokenKind::Int => {
                let tok = self.advance();
                // Literals become C `int`s.
                let value = tok.lexeme.parse::<i32>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::IntOutOfRange { literal: tok.lexeme.clone() },
                        tok.span,
                        tok.pos,
                    )
                })?;
                Ok(Expr::int(i64::from(value), pos))
            }
            TokenKind::String => {
                let tok = self.advance();
                Ok(Expr::string(tok.lexeme, pos))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::bool(true, pos))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::bool(false, pos))
            }
            TokenKind::Ident => {
                let tok = self.advance();
                if self.check(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::call(tok.lexeme, args, pos))
                } else {
                    Ok(Expr::ident(tok.lexeme, pos))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(Expr::grouping(inner, pos))
            }
            TokenKind::Input => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let prompt = if self.check(TokenKind::RParen) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.expect(TokenKind::RParen)?;
                Ok(Expr::builtin(Builtin::Input, prompt, pos))
            }
            TokenKind::IsNumber => self.parse_builtin(Builtin::IsNumber),
            TokenKind::IsString => self.parse_builtin(Builtin::IsString),
            TokenKind::Exit => self.parse_builtin(Builtin::Exit),
            TokenKind::Abs => self.parse_builtin(Builtin::Abs),
            TokenKind::Unknown => Err(ParseError::unknown_char(&self.current)),
            found => {
                let kind = ParseErrorKind::InvalidExpression { found: self.current.describe() };
                Err(ParseError::at(kind, &self.current)
                    .with_hint_opt(crate::hints::for_invalid_expression(found)))
            }
        }
    }

    /// `name ( expr )` for the single-argument built-ins.
    fn parse_builtin(&mut self, func: Builtin) -> Result<Expr, ParseError> {
        let tok = self.advance();
        self.expect(TokenKind::LParen)?;
        let arg = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(Expr::builtin(func, Some(arg), tok.pos))
    }

    /// `( expr, expr, ... )`. Arguments are read until `)` or end of input;
    /// commas between them are optional.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) && !self.at_end() {
            args.push(self.parse_expression()?);
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }
}

/// Height of an expression tree. Trees handed to this are already capped,
/// so the recursion is bounded.
fn tree_depth(expr: &Expr) -> usize {
    let children = match &expr.kind {
        ExprKind::Int(_) | ExprKind::String(_) | ExprKind::Bool(_) | ExprKind::Ident(_) => 0,
        ExprKind::Binary { left, right, .. } => tree_depth(left).max(tree_depth(right)),
        ExprKind::Unary { operand, .. } => tree_depth(operand),
        ExprKind::Call { args, .. } => args.iter().map(tree_depth).max().unwrap_or(0),
        ExprKind::Grouping(inner) => tree_depth(inner),
        ExprKind::Builtin { arg, .. } => arg.as_deref().map_or(0, tree_depth),
    };
    children + 1
}

/// A syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// 1-based line and column of the offending token.
    pub pos: Pos,
    pub hint: Option<String>,
}

/// The kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A character the lexer does not recognise.
    #[error("unknown character '{text}'")]
    UnknownChar { text: String },

    /// The current token does not fit the production being parsed.
    #[error("expected {expected}, found {found}")]
    Expected { expected: &'static str, found: String },

    /// No expression can start with the current token.
    #[error("invalid expression: found {found}")]
    InvalidExpression { found: String },

    /// A statement starting with a name that is neither assigned nor called.
    #[error("expected assignment operator or function call after '{name}', found {found}")]
    ExpectedAssignOrCall { name: String, found: String },

    /// `fn` inside a block.
    #[error("functions can only be declared at the top level")]
    NestedFunction { name: String },

    /// An integer literal that does not fit in a 32-bit `int`.
    #[error("integer literal '{literal}' is too large")]
    IntOutOfRange { literal: String },

    /// Blocks or expressions nested past `MAX_NESTING`.
    #[error("code is nested too deeply (limit is {limit} levels)")]
    TooDeeplyNested { limit: usize },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, pos: Pos) -> Self {
        Self { kind, span, pos, hint: None }
    }

    fn at(kind: ParseErrorKind, token: &Token) -> Self {
        Self::new(kind, token.span, token.pos)
    }

    fn unknown_char(token: &Token) -> Self {
        Self::at(ParseErrorKind::UnknownChar { text: token.lexeme.clone() }, token)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn with_hint_opt(mut self, hint: Option<&str>) -> Self {
        self.hint = hint.map(String::from);
        self
    }

    pub fn line(&self) -> u32 {
        self.pos.line
    }

    pub fn column(&self) -> u32 {
        self.pos.column
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {}
