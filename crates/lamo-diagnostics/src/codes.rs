// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes (E0001, E0100, etc.) to titles and categories.
//! Used by `lamo explain <code>` and the JSON report.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
    pub explanation: &'static str,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr, $explanation:literal)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
                explanation: $explanation,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unknown character", Lexical,
                    "The source contains a character that is not part of any Lamo token, \
                     such as `@`, `#` or a single `&`."),

                // Parser errors (E01xx)
                "E0100" => ("unexpected token", Syntax,
                    "The parser needed a specific token, such as `;` after a statement or \
                     `)` to close a parenthesis, and found something else."),
                "E0101" => ("invalid expression", Syntax,
                    "An expression was expected but the token found cannot start one. \
                     Expressions start with a number, string, `true`, `false`, a name, \
                     `(`, `-`, `!` or a built-in such as `input`."),
                "E0102" => ("expected assignment or call", Syntax,
                    "A statement that starts with a name must assign to it (`=`, `+=`, \
                     `-=`, `++`, `--`) or call it as a function."),
                "E0103" => ("nested function", Syntax,
                    "Functions can only be declared at the top level of a file, not \
                     inside a block or another function."),
                "E0104" => ("integer literal too large", Syntax,
                    "Integer literals become C `int`s and must fit in a signed 32-bit \
                     integer, so the largest literal is 2147483647."),
                "E0105" => ("nesting too deep", Syntax,
                    "Blocks, `else if` chains, parentheses and unary operators can nest \
                     at most 256 levels deep, and a chain of binary operators can be at \
                     most 256 levels tall. Move parts of the code into functions or \
                     intermediate `let` bindings."),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    /// All codes, sorted.
    pub fn all(&self) -> Vec<&ErrorCodeInfo> {
        let mut all: Vec<_> = self.codes.values().collect();
        all.sort_by_key(|info| info.code);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_code() {
        let registry = ErrorCodeRegistry::default();
        let info = registry.get("E0100").expect("E0100 registered");
        assert_eq!(info.title, "unexpected token");
        assert_eq!(info.category, ErrorCategory::Syntax);
        assert!(registry.get("E9999").is_none());
    }

    #[test]
    fn all_is_sorted() {
        let registry = ErrorCodeRegistry::default();
        let codes: Vec<_> = registry.all().iter().map(|i| i.code).collect();
        assert_eq!(codes, vec!["E0001", "E0100", "E0101", "E0102", "E0103", "E0104", "E0105"]);
    }
}
