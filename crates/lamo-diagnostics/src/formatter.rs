// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatters for diagnostics.
//!
//! The short form is a single line:
//!
//! ```text
//! prog.lamo:1:15: error[E0100]: expected ')', found ';'
//! ```
//!
//! The rich form adds the source line and a caret, similar to rustc:
//!
//! ```text
//! error[E0100]: expected ')', found ';'
//!   --> prog.lamo:1:15
//!     |
//!   1 | let x = (5 + 3;
//!     |               ^ expected ')' here
//!     = help: add ')' before the ';'
//! ```

use colored::Colorize;

use lamo_ast::{LineMap, Pos};

use crate::Diagnostic;

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_map = LineMap::new(source);
        Self {
            source,
            file_name: None,
            line_map,
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    fn file(&self) -> &str {
        self.file_name.unwrap_or("<source>")
    }

    /// `file:line:col: error[CODE]: message`, no trailing newline.
    pub fn format_short(&self, diagnostic: &Diagnostic) -> String {
        let title = diagnostic.title().red().bold();
        match diagnostic.primary_span() {
            Some(span) => {
                let pos = self.line_map.position(span.start);
                format!("{}:{}: {}: {}", self.file(), pos, title, diagnostic.message)
            }
            None => format!("{}: {}: {}", self.file(), title, diagnostic.message),
        }
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        // Line 1: severity[code]: message
        out.push_str(&format!(
            "{}: {}\n",
            diagnostic.title().red().bold(),
            diagnostic.message.bold()
        ));

        if let Some(label) = diagnostic.labels.first() {
            let pos = self.line_map.position(label.span.start);
            let gutter_width = pos.line.to_string().len().max(2);

            // Line 2: --> file:line:col
            out.push_str(&format!("  {} {}:{}\n", "-->".blue(), self.file(), pos));
            out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));

            let text = self.line_map.line_text(self.source, pos.line).unwrap_or("");
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                pos.line.to_string().blue().bold(),
                "|".blue(),
                text,
                width = gutter_width + 1,
            ));

            let underline = underline(pos, label.span.len(), text.len());
            let message = label.message.as_deref().unwrap_or("");
            out.push_str(&format!(
                "{} {} {} {}\n",
                " ".repeat(gutter_width + 1),
                "|".blue(),
                underline.red().bold(),
                message.red().bold(),
            ));
        }

        self.format_footer(&mut out, diagnostic);
        out
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let gutter_width = 2;

        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter_width + 1),
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }

        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter_width + 1),
                "=".cyan(),
                "help".cyan().bold(),
                help
            ));
        }
    }
}

/// Spaces up to the column, then carets. Spans running past the end of the
/// line are cut at the line end; at least one caret is always drawn.
fn underline(pos: Pos, span_len: usize, line_len: usize) -> String {
    let start = pos.column.saturating_sub(1) as usize;
    let visible = line_len.saturating_sub(start);
    let carets = span_len.min(visible).max(1);
    format!("{}{}", " ".repeat(start), "^".repeat(carets))
}
