// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Fixed C text placed before the generated functions.

pub(crate) const HEADER: &str = "// Generated by lamo from the program AST\n";

pub(crate) const INCLUDES: &str = "\
#include <stdio.h>
#include <stdlib.h>
#include <string.h>
";

/// Reads one line from stdin without its newline. Each call returns a
/// fresh heap copy, so earlier results stay valid.
pub(crate) const INPUT_HELPER: &str = r#"static char* lamo_input(const char* prompt) {
    char buffer[1024];
    if (prompt) {
        printf("%s", prompt);
        fflush(stdout);
    }
    if (!fgets(buffer, sizeof buffer, stdin)) {
        buffer[0] = '\0';
    }
    buffer[strcspn(buffer, "\n")] = '\0';
    size_t len = strlen(buffer);
    char* copy = malloc(len + 1);
    if (!copy) {
        exit(1);
    }
    memcpy(copy, buffer, len + 1);
    return copy;
}
"#;

/// Optional sign followed by one or more decimal digits.
pub(crate) const ISNUMBER_HELPER: &str = r#"static int lamo_isnumber(const char* s) {
    if (*s == '+' || *s == '-') {
        s++;
    }
    if (!*s) {
        return 0;
    }
    for (; *s; s++) {
        if (*s < '0' || *s > '9') {
            return 0;
        }
    }
    return 1;
}
"#;

/// Which helpers the program body referenced.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Helpers {
    pub input: bool,
    pub isnumber: bool,
}

/// Header comment, includes, then any helpers, each followed by a blank line.
pub(crate) fn prelude(header: bool, helpers: Helpers) -> String {
    let mut out = String::new();
    if header {
        out.push_str(HEADER);
    }
    out.push_str(INCLUDES);
    out.push('\n');
    if helpers.input {
        out.push_str(INPUT_HELPER);
        out.push('\n');
    }
    if helpers.isnumber {
        out.push_str(ISNUMBER_HELPER);
        out.push('\n');
    }
    out
}
