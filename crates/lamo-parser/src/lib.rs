// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Lamo language.
//!
//! Transforms a token stream into an abstract syntax tree.

mod hints;
mod parser;

pub use parser::{ParseError, ParseErrorKind, Parser, MAX_NESTING};

use lamo_ast::decl::Program;

/// Lex and parse a complete source file.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(lamo_lexer::Lexer::new(source)).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamo_ast::expr::{BinOp, Builtin, Expr, ExprKind, UnaryOp};
    use lamo_ast::stmt::{AssignOp, ElseBranch, Stmt, StmtKind};
    use lamo_ast::Pos;

    fn parse_ok(src: &str) -> Program {
        match parse(src) {
            Ok(program) => program,
            Err(e) => panic!("Parse error at {}: {}", e.pos, e),
        }
    }

    fn parse_err(src: &str) -> ParseError {
        match parse(src) {
            Ok(program) => panic!("Expected parse error, got {:?}", program),
            Err(e) => e,
        }
    }

    fn first_stmt(src: &str) -> Stmt {
        parse_ok(src).decls.into_iter().next().expect("at least one statement")
    }

    fn var_init(src: &str) -> Expr {
        match first_stmt(src).kind {
            StmtKind::VarDecl { init, .. } => init,
            other => panic!("Expected VarDecl, got {:?}", other),
        }
    }

    /// Strip positions so trees can be compared by shape.
    fn shape(expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Int(v) => v.to_string(),
            ExprKind::String(s) => format!("{:?}", s),
            ExprKind::Bool(b) => b.to_string(),
            ExprKind::Ident(n) => n.clone(),
            ExprKind::Binary { op, left, right } => {
                format!("({} {} {})", op.symbol(), shape(left), shape(right))
            }
            ExprKind::Unary { op, operand } => format!("({} {})", op.symbol(), shape(operand)),
            ExprKind::Call { name, args } => {
                let args: Vec<_> = args.iter().map(shape).collect();
                format!("{}({})", name, args.join(", "))
            }
            ExprKind::Grouping(inner) => format!("[{}]", shape(inner)),
            ExprKind::Builtin { func, arg } => match arg {
                Some(arg) => format!("{}!({})", func.name(), shape(arg)),
                None => format!("{}!()", func.name()),
            },
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let init = var_init("let r = 2 + 3 * 4;");
        assert_eq!(shape(&init), "(+ 2 (* 3 4))");
        match init.kind {
            ExprKind::Binary { op: BinOp::Add, .. } => {}
            other => panic!("Expected addition at the root, got {:?}", other),
        }
    }

    #[test]
    fn binary_levels_are_left_associative() {
        assert_eq!(shape(&var_init("let r = 10 - 4 - 3;")), "(- (- 10 4) 3)");
        assert_eq!(shape(&var_init("let r = 8 / 2 % 3;")), "(% (/ 8 2) 3)");
    }

    #[test]
    fn full_precedence_ladder() {
        let init = var_init("let r = a || b && c == d < e + f * -g;");
        assert_eq!(shape(&init), "(|| a (&& b (== c (< d (+ e (* f (- g)))))))");
    }

    #[test]
    fn unary_is_right_recursive() {
        let init = var_init("let r = !-x;");
        match &init.kind {
            ExprKind::Unary { op: UnaryOp::Not, operand } => {
                assert!(matches!(operand.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
            }
            other => panic!("Expected unary not, got {:?}", other),
        }
    }

    #[test]
    fn grouping_is_preserved() {
        assert_eq!(shape(&var_init("let r = (1 + 2) * 3;")), "(* [(+ 1 2)] 3)");
    }

    #[test]
    fn calls_in_expressions() {
        assert_eq!(shape(&var_init("let r = add(1, mul(2, 3));")), "add(1, mul(2, 3))");
        assert_eq!(shape(&var_init("let r = f();")), "f()");
    }

    #[test]
    fn literals() {
        assert_eq!(shape(&var_init("let s = \"hi there\";")), "\"hi there\"");
        assert_eq!(shape(&var_init("let t = true;")), "true");
        assert_eq!(shape(&var_init("let f = false;")), "false");
    }

    #[test]
    fn increment_desugars_to_plain_assignment() {
        let desugared = first_stmt("x++;");
        let explicit = first_stmt("x = x + 1;");
        match (&desugared.kind, &explicit.kind) {
            (
                StmtKind::Assign { name: n1, op: op1, value: v1 },
                StmtKind::Assign { name: n2, op: op2, value: v2 },
            ) => {
                assert_eq!(n1, n2);
                assert_eq!(*op1, AssignOp::Assign);
                assert_eq!(op1, op2);
                assert_eq!(shape(v1), shape(v2));
            }
            other => panic!("Expected two assignments, got {:?}", other),
        }
    }

    #[test]
    fn decrement_desugars_with_target_position() {
        let stmt = first_stmt("  y--;");
        match stmt.kind {
            StmtKind::Assign { name, op, value } => {
                assert_eq!(name, "y");
                assert_eq!(op, AssignOp::Assign);
                assert_eq!(shape(&value), "(- y 1)");
                assert_eq!(value.pos, Pos::new(1, 3));
                assert_eq!(stmt.pos, Pos::new(1, 3));
            }
            other => panic!("Expected Assign, got {:?}", other),
        }
    }

    #[test]
    fn compound_assignment_keeps_operator() {
        match first_stmt("total += 5;").kind {
            StmtKind::Assign { op, .. } => assert_eq!(op, AssignOp::AddAssign),
            other => panic!("Expected Assign, got {:?}", other),
        }
        match first_stmt("total -= 5;").kind {
            StmtKind::Assign { op, .. } => assert_eq!(op, AssignOp::SubAssign),
            other => panic!("Expected Assign, got {:?}", other),
        }
    }

    #[test]
    fn call_statement() {
        match first_stmt("greet(\"bob\", 3);").kind {
            StmtKind::Call { name, args } => {
                assert_eq!(name, "greet");
                assert_eq!(args.len(), 2);
            }
            other => panic!("Expected Call, got {:?}", other),
        }
    }

    #[test]
    fn function_declaration() {
        let program = parse_ok("fn add(a, b) { return a + b; }");
        let f = program.functions().next().expect("one function");
        assert_eq!(f.name, "add");
        assert_eq!(f.params, vec!["a", "b"]);
        assert_eq!(f.body.stmts.len(), 1);
        assert!(matches!(f.body.stmts[0].kind, StmtKind::Return(_)));
    }

    #[test]
    fn else_if_chains_nest_to_the_right() {
        let stmt = first_stmt("if (a) { print(1); } else if (b) { print(2); } else { print(3); }");
        let StmtKind::If { cond, else_branch, .. } = stmt.kind else {
            panic!("Expected If");
        };
        assert_eq!(shape(&cond), "a");
        let Some(ElseBranch::If(inner)) = else_branch else {
            panic!("Expected else-if branch");
        };
        let StmtKind::If { cond, else_branch, .. } = inner.kind else {
            panic!("Expected nested If");
        };
        assert_eq!(shape(&cond), "b");
        match else_branch {
            Some(ElseBranch::Block(block)) => assert_eq!(block.stmts.len(), 1),
            other => panic!("Expected final else block, got {:?}", other),
        }
    }

    #[test]
    fn for_with_all_clauses() {
        let stmt = first_stmt("for (let i = 0; i < 10; i++) { print(i); }");
        let StmtKind::For { init, cond, step, body } = stmt.kind else {
            panic!("Expected For");
        };
        assert!(matches!(init.as_deref().map(|s| &s.kind), Some(StmtKind::VarDecl { .. })));
        assert_eq!(shape(&cond), "(< i 10)");
        match step.map(|s| s.kind) {
            Some(StmtKind::Assign { op, value, .. }) => {
                assert_eq!(op, AssignOp::Assign);
                assert_eq!(shape(&value), "(+ i 1)");
            }
            other => panic!("Expected desugared step, got {:?}", other),
        }
        assert_eq!(body.stmts.len(), 1);
    }

    #[test]
    fn for_with_empty_clauses() {
        let stmt = first_stmt("for ( ; x < 10 ; ) { x += 1; }");
        let StmtKind::For { init, step, .. } = stmt.kind else {
            panic!("Expected For");
        };
        assert!(init.is_none());
        assert!(step.is_none());
    }

    #[test]
    fn for_init_requires_assignment_operator() {
        let err = parse_err("for (i; i < 3; i++) { }");
        assert!(matches!(err.kind, ParseErrorKind::ExpectedAssignOrCall { .. }));
    }

    #[test]
    fn missing_close_paren_is_fatal() {
        let err = parse_err("let x = (5 + 3;");
        assert_eq!(err.pos, Pos::new(1, 15));
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected { expected: "')'", found: "';'".to_string() }
        );
        assert_eq!(err.to_string(), "expected ')', found ';'");
    }

    #[test]
    fn invalid_expression() {
        let err = parse_err("print(;);");
        assert!(matches!(err.kind, ParseErrorKind::InvalidExpression { .. }));
        assert_eq!(err.pos, Pos::new(1, 7));
    }

    #[test]
    fn bare_name_statement_is_rejected() {
        let err = parse_err("x;");
        match err.kind {
            ParseErrorKind::ExpectedAssignOrCall { name, found } => {
                assert_eq!(name, "x");
                assert_eq!(found, "';'");
            }
            other => panic!("Expected ExpectedAssignOrCall, got {:?}", other),
        }
    }

    #[test]
    fn nested_functions_are_rejected() {
        let err = parse_err("fn outer() {\n    fn inner() { return 1; }\n}");
        assert_eq!(err.kind, ParseErrorKind::NestedFunction { name: "inner".to_string() });
        assert_eq!(err.pos, Pos::new(2, 5));
    }

    #[test]
    fn unknown_character_is_fatal() {
        let err = parse_err("let a = 1 & 2;");
        assert_eq!(err.kind, ParseErrorKind::UnknownChar { text: "&".to_string() });
        let err = parse_err("@");
        assert_eq!(err.kind, ParseErrorKind::UnknownChar { text: "@".to_string() });
    }

    #[test]
    fn oversized_integer_literal() {
        let err = parse_err("let big = 99999999999999999999;");
        assert!(matches!(err.kind, ParseErrorKind::IntOutOfRange { .. }));
    }

    #[test]
    fn integer_literals_fit_in_c_int() {
        let init = var_init("let max = 2147483647;");
        assert_eq!(init.kind, ExprKind::Int(2147483647));

        let err = parse_err("let x = 2147483648;");
        assert_eq!(
            err.kind,
            ParseErrorKind::IntOutOfRange { literal: "2147483648".to_string() }
        );
        assert_eq!(err.pos, Pos::new(1, 9));
    }

    /// Runs `f` with the stack size of a process main thread, which is
    /// what the `lamo` binary gets.
    fn with_main_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(8 << 20)
            .spawn(f)
            .expect("spawn parser thread")
            .join()
            .expect("parser thread panicked")
    }

    #[test]
    fn nesting_at_the_limit_is_accepted() {
        let depth = MAX_NESTING - 2;
        let src = format!("print({}1{});", "(".repeat(depth), ")".repeat(depth));
        let result = with_main_stack(move || parse(&src).map(|p| p.decls.len()));
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn deep_unary_chain_is_an_error_not_a_crash() {
        let src = format!("print({}1);", "- ".repeat(200_000));
        let err = with_main_stack(move || parse(&src)).expect_err("too deep");
        assert_eq!(err.kind, ParseErrorKind::TooDeeplyNested { limit: MAX_NESTING });
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn deep_parentheses_are_an_error() {
        let src = format!("let x = {}1{};", "(".repeat(1000), ")".repeat(1000));
        let err = with_main_stack(move || parse(&src)).expect_err("too deep");
        assert_eq!(err.kind, ParseErrorKind::TooDeeplyNested { limit: MAX_NESTING });
    }

    #[test]
    fn long_operator_chain_is_capped() {
        let ok = format!("let x = 1{};", " + 1".repeat(MAX_NESTING - 1));
        assert!(parse(&ok).is_ok());

        let src = format!("let x = 1{};", " + 1".repeat(100_000));
        let err = parse_err(&src);
        assert_eq!(err.kind, ParseErrorKind::TooDeeplyNested { limit: MAX_NESTING });
    }

    #[test]
    fn deep_blocks_are_an_error() {
        let src = format!("{}print(1);{}", "while (1) { ".repeat(1000), "}".repeat(1000));
        let err = with_main_stack(move || parse(&src)).expect_err("too deep");
        assert_eq!(err.kind, ParseErrorKind::TooDeeplyNested { limit: MAX_NESTING });
    }

    #[test]
    fn stray_tokens_at_statement_start_are_skipped() {
        let program = parse_ok("; 42 } let a = 1;");
        assert_eq!(program.decls.len(), 1);
        assert!(matches!(program.decls[0].kind, StmtKind::VarDecl { .. }));
    }

    #[test]
    fn builtins_in_expressions() {
        assert_eq!(shape(&var_init("let n = input();")), "input!()");
        assert_eq!(shape(&var_init("let n = input(\"name? \");")), "input!(\"name? \")");
        assert_eq!(shape(&var_init("let n = abs(0 - 3);")), "abs!((- 0 3))");
        match var_init("let n = isnumber(x);").kind {
            ExprKind::Builtin { func: Builtin::IsNumber, arg: Some(_) } => {}
            other => panic!("Expected isnumber, got {:?}", other),
        }
    }

    #[test]
    fn exit_statement() {
        match first_stmt("exit(2);").kind {
            StmtKind::Exit(code) => assert_eq!(shape(&code), "2"),
            other => panic!("Expected Exit, got {:?}", other),
        }
    }

    #[test]
    fn statements_keep_source_order() {
        let program = parse_ok("let a = 1;\nfn f() { return 2; }\nprint(a);");
        assert_eq!(program.decls.len(), 3);
        assert!(program.decls[1].is_fn_decl());
        assert_eq!(program.decls[2].pos, Pos::new(3, 1));
    }

    #[test]
    fn empty_program() {
        assert!(parse_ok("// nothing here\n").decls.is_empty());
    }
}
