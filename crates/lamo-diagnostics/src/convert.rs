// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from compiler error types to `Diagnostic`.

use lamo_ast::token::TokenKind;
use lamo_parser::{ParseError, ParseErrorKind};

use crate::suggestions::did_you_mean;
use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        use ParseErrorKind::*;

        let message = self.kind.to_string();
        let mut hint = self.hint.clone();

        let mut diag = match &self.kind {
            UnknownChar { .. } => Diagnostic::error(message)
                .with_code("E0001")
                .with_primary(self.span, "not part of any token"),

            Expected { expected, .. } => Diagnostic::error(message)
                .with_code("E0100")
                .with_primary(self.span, format!("expected {} here", expected)),

            InvalidExpression { .. } => Diagnostic::error(message)
                .with_code("E0101")
                .with_primary(self.span, "expected an expression"),

            ExpectedAssignOrCall { name, .. } => {
                if let Some(suggestion) = did_you_mean(name, TokenKind::KEYWORDS.iter().copied()) {
                    hint = Some(suggestion);
                }
                Diagnostic::error(message)
                    .with_code("E0102")
                    .with_primary(self.span, "expected '=', '+=', '-=', '++', '--' or '('")
            }

            NestedFunction { .. } => Diagnostic::error(message)
                .with_code("E0103")
                .with_primary(self.span, "nested function")
                .with_note("Lamo functions cannot see the variables of an enclosing block"),

            IntOutOfRange { .. } => Diagnostic::error(message)
                .with_code("E0104")
                .with_primary(self.span, "does not fit in 32 bits"),

            TooDeeplyNested { .. } => Diagnostic::error(message)
                .with_code("E0105")
                .with_primary(self.span, "nesting limit reached here"),
        };

        if let Some(hint) = hint {
            diag = diag.with_help(hint);
        }

        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnose(src: &str) -> Diagnostic {
        match lamo_parser::parse(src) {
            Ok(_) => panic!("Expected parse error for {:?}", src),
            Err(e) => e.to_diagnostic(),
        }
    }

    fn code(diag: &Diagnostic) -> &str {
        diag.code.as_ref().map(|c| c.0.as_str()).unwrap_or("")
    }

    #[test]
    fn each_kind_has_its_code() {
        assert_eq!(code(&diagnose("let a = 1 @ 2;")), "E0001");
        assert_eq!(code(&diagnose("let x = (5 + 3;")), "E0100");
        assert_eq!(code(&diagnose("print();")), "E0101");
        assert_eq!(code(&diagnose("x;")), "E0102");
        assert_eq!(code(&diagnose("if (1) { fn f() { } }")), "E0103");
        assert_eq!(code(&diagnose("print(123456789012345678901);")), "E0104");
        assert_eq!(code(&diagnose("print(2147483648);")), "E0104");
        let deep = format!("let x = 1{};", " * 2".repeat(300));
        assert_eq!(code(&diagnose(&deep)), "E0105");
    }

    #[test]
    fn expected_token_message_and_help() {
        let diag = diagnose("let x = (5 + 3;");
        assert_eq!(diag.message, "expected ')', found ';'");
        assert_eq!(diag.primary_span().map(|s| s.start), Some(14));
        assert_eq!(diag.help.as_deref(), Some("add ')' before the ';'"));
    }

    #[test]
    fn misspelled_keyword_gets_did_you_mean() {
        let diag = diagnose("retrun x;");
        assert_eq!(diag.help.as_deref(), Some("did you mean `return`?"));
    }

    #[test]
    fn nested_function_has_note() {
        let diag = diagnose("while (1) { fn f() { } }");
        assert_eq!(diag.notes.len(), 1);
    }
}
