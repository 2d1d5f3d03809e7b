// SPDX-License-Identifier: (MIT OR Apache-2.0)

use lamo_ast::decl::{FnDecl, Program};
use lamo_ast::expr::{Builtin, Expr, ExprKind, UnaryOp};
use lamo_ast::stmt::{Block, ElseBranch, Stmt, StmtKind};

use crate::config::CodegenConfig;
use crate::runtime::{self, Helpers};
use crate::scope::Scopes;

const INT_TYPE: &str = "int";
const STRING_TYPE: &str = "const char*";

/// Renders a parsed program as a single C translation unit.
pub struct CodeGenerator<'a> {
    output: String,
    indent: usize,
    config: &'a CodegenConfig,
    scopes: Scopes,
    helpers: Helpers,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            config,
            scopes: Scopes::default(),
            helpers: Helpers::default(),
        }
    }

    /// Prototypes, function definitions, then `main` wrapping every
    /// top-level statement that is not a function.
    pub fn generate(mut self, program: &Program) -> String {
        for func in program.functions() {
            self.emit_signature(func);
            self.emit(";");
            self.emit_newline();
        }
        self.emit_newline();

        for func in program.functions() {
            self.emit_function(func);
            self.emit_newline();
        }

        self.emit("int main() {");
        self.emit_newline();
        self.indent += 1;
        self.scopes.push();
        for stmt in program.top_level_stmts() {
            self.emit_stmt(stmt);
        }
        self.scopes.pop();
        self.emit_indent();
        self.emit("return 0;");
        self.emit_newline();
        self.indent -= 1;
        self.emit("}");
        self.emit_newline();

        let mut out = runtime::prelude(self.config.header, self.helpers);
        out.push_str(&self.output);
        out
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_newline(&mut self) {
        self.output.push('\n');
    }

    fn emit_indent(&mut self) {
        let spaces = self.indent * self.config.indent_width;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    /// An expression is string-typed if it is a string literal, an `input`
    /// call, a grouping of one, or a name whose visible `let` held one.
    fn is_string_typed(&self, expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::String(_) => true,
            ExprKind::Builtin { func: Builtin::Input, .. } => true,
            ExprKind::Grouping(inner) => self.is_string_typed(inner),
            ExprKind::Ident(name) => self.scopes.is_string(name),
            _ => false,
        }
    }

    // --- Declarations ---

    fn emit_signature(&mut self, func: &FnDecl) {
        self.emit(INT_TYPE);
        self.emit(" ");
        self.emit(&func.name);
        self.emit("(");
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.emit(INT_TYPE);
            self.emit(" ");
            self.emit(param);
        }
        self.emit(")");
    }

    /// Function bodies see only their parameters, never `main`'s locals.
    fn emit_function(&mut self, func: &FnDecl) {
        self.emit_indent();
        self.emit_signature(func);
        self.emit(" ");

        let outer = std::mem::take(&mut self.scopes);
        self.scopes.push();
        for param in &func.params {
            self.scopes.declare(param, false);
        }
        self.emit_block(&func.body);
        self.scopes = outer;
    }

    // --- Statements ---

    /// `{`, the statements one level deeper, then `}` and a newline. The
    /// caller has already written whatever precedes the brace.
    fn emit_block(&mut self, block: &Block) {
        self.emit("{");
        self.emit_newline();
        self.indent += 1;
        self.scopes.push();
        for stmt in &block.stmts {
            self.emit_stmt(stmt);
        }
        self.scopes.pop();
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
        self.emit_newline();
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::FnDecl(func) => self.emit_function(func),
            StmtKind::If { .. } => {
                self.emit_indent();
                self.emit_if(stmt);
            }
            StmtKind::While { cond, body } => {
                self.emit_indent();
                self.emit("while (");
                self.emit_expr(cond);
                self.emit(") ");
                self.emit_block(body);
            }
            StmtKind::For { init, cond, step, body } => {
                self.emit_indent();
                self.scopes.push();
                self.emit("for (");
                if let Some(init) = init {
                    self.emit_simple_stmt(init);
                }
                self.emit("; ");
                self.emit_expr(cond);
                self.emit("; ");
                if let Some(step) = step {
                    self.emit_simple_stmt(step);
                }
                self.emit(") ");
                self.emit_block(body);
                self.scopes.pop();
            }
            _ => {
                self.emit_indent();
                self.emit_simple_stmt(stmt);
                self.emit(";");
                self.emit_newline();
            }
        }
    }

    /// `if (cond) {...}` with its else chain. `else if` stays on the
    /// `else` line.
    fn emit_if(&mut self, stmt: &Stmt) {
        let StmtKind::If { cond, then_branch, else_branch } = &stmt.kind else {
            return;
        };
        self.emit("if (");
        self.emit_expr(cond);
        self.emit(") ");
        self.emit_block(then_branch);

        match else_branch {
            Some(ElseBranch::Block(block)) => {
                self.emit_indent();
                self.emit("else ");
                self.emit_block(block);
            }
            Some(ElseBranch::If(nested)) => {
                self.emit_indent();
                self.emit("else ");
                self.emit_if(nested);
            }
            None => {}
        }
    }

    /// Statements that render on one line without the trailing `;`. Also
    /// used for `for` headers.
    fn emit_simple_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl { name, init } => {
                let is_string = self.is_string_typed(init);
                self.emit(if is_string { STRING_TYPE } else { INT_TYPE });
                self.emit(" ");
                self.emit(name);
                self.emit(" = ");
                self.emit_expr(init);
                self.scopes.declare(name, is_string);
            }
            StmtKind::Assign { name, op, value } => {
                self.emit(name);
                self.emit(" ");
                self.emit(op.symbol());
                self.emit(" ");
                self.emit_expr(value);
            }
            StmtKind::Return(value) => {
                self.emit("return ");
                self.emit_expr(value);
            }
            StmtKind::Print(value) => {
                if self.is_string_typed(value) {
                    self.emit("printf(\"%s\\n\", ");
                } else {
                    self.emit("printf(\"%d\\n\", ");
                }
                self.emit_expr(value);
                self.emit(")");
            }
            StmtKind::Call { name, args } => self.emit_call(name, args),
            StmtKind::Exit(code) => {
                self.emit("exit(");
                self.emit_expr(code);
                self.emit(")");
            }
            // Compound statements never appear in a `for` header.
            StmtKind::FnDecl(_) | StmtKind::If { .. } | StmtKind::While { .. } | StmtKind::For { .. } => {}
        }
    }

    // --- Expressions ---

    fn emit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Int(value) => self.emit(&value.to_string()),
            ExprKind::String(text) => {
                self.emit("\"");
                self.emit_string_body(text);
                self.emit("\"");
            }
            ExprKind::Bool(value) => self.emit(if *value { "1" } else { "0" }),
            ExprKind::Ident(name) => self.emit(name),
            ExprKind::Binary { op, left, right } => {
                self.emit_expr(left);
                self.emit(" ");
                self.emit(op.symbol());
                self.emit(" ");
                self.emit_expr(right);
            }
            ExprKind::Unary { op, operand } => {
                self.emit(op.symbol());
                let start = self.output.len();
                self.emit_expr(operand);
                // `- -x` must not become the C decrement `--x`.
                if *op == UnaryOp::Neg && self.output[start..].starts_with('-') {
                    self.output.insert(start, ' ');
                }
            }
            ExprKind::Call { name, args } => self.emit_call(name, args),
            ExprKind::Grouping(inner) => {
                self.emit("(");
                self.emit_expr(inner);
                self.emit(")");
            }
            ExprKind::Builtin { func, arg } => self.emit_builtin(*func, arg.as_deref()),
        }
    }

    /// Backslash sequences are copied as written. Raw control characters
    /// are escaped so the C literal stays on one line.
    fn emit_string_body(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => self.emit("\\n"),
                '\r' => self.emit("\\r"),
                '\t' => self.emit("\\t"),
                c if c.is_ascii_control() => self.emit(&format!("\\{:03o}", u32::from(c))),
                c => self.output.push(c),
            }
        }
    }

    fn emit_call(&mut self, name: &str, args: &[Expr]) {
        self.emit(name);
        self.emit("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.emit_expr(arg);
        }
        self.emit(")");
    }

    fn emit_builtin(&mut self, func: Builtin, arg: Option<&Expr>) {
        match (func, arg) {
            (Builtin::Input, prompt) => {
                self.helpers.input = true;
                self.emit("lamo_input(");
                match prompt {
                    Some(prompt) => self.emit_expr(prompt),
                    None => self.emit("NULL"),
                }
                self.emit(")");
            }
            (Builtin::IsNumber, Some(arg)) if self.is_string_typed(arg) => {
                self.helpers.isnumber = true;
                self.emit("lamo_isnumber(");
                self.emit_expr(arg);
                self.emit(")");
            }
            (Builtin::IsNumber, Some(arg)) => self.emit_discarded(arg, "1"),
            (Builtin::IsString, Some(arg)) => {
                let result = if self.is_string_typed(arg) { "1" } else { "0" };
                self.emit_discarded(arg, result);
            }
            (Builtin::Abs, Some(arg)) => {
                self.emit("abs(");
                self.emit_expr(arg);
                self.emit(")");
            }
            (Builtin::Exit, Some(arg)) => {
                self.emit("(exit(");
                self.emit_expr(arg);
                self.emit("), 0)");
            }
            // The parser always supplies an argument for these.
            (_, None) => self.emit("0"),
        }
    }

    /// `((void)(arg), result)`: evaluate for side effects, yield a constant.
    fn emit_discarded(&mut self, arg: &Expr, result: &str) {
        self.emit("((void)(");
        self.emit_expr(arg);
        self.emit("), ");
        self.emit(result);
        self.emit(")");
    }
}
