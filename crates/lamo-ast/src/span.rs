// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

use std::fmt;

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn point(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A 1-based line/column position, stamped on every AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line-start offsets for byte-offset → line:col lookup.
///
/// Columns count bytes, so a tab or a multi-byte character advances the
/// column by its encoded width.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineMap { line_starts, len: source.len() }
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Pos {
        let offset = offset.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let column = offset - self.line_starts[line_idx] + 1;
        Pos::new((line_idx + 1) as u32, column as u32)
    }

    /// Source text of a 1-based line, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(source.len());
        source.get(start..end).map(|l| l.trim_end_matches('\r'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.position(0), Pos::new(1, 1));
        assert_eq!(lm.line_text("", 1), Some(""));
    }

    #[test]
    fn positions_across_lines() {
        let src = "let a = 1;\nprint(a);\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.position(0), Pos::new(1, 1));
        assert_eq!(lm.position(4), Pos::new(1, 5)); // 'a'
        assert_eq!(lm.position(11), Pos::new(2, 1)); // 'p'
        assert_eq!(lm.position(10), Pos::new(1, 11)); // the '\n' belongs to line 1
        assert_eq!(lm.line_text(src, 2), Some("print(a);"));
        assert_eq!(lm.line_text(src, 3), Some(""));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn offsets_past_end_clamp() {
        let lm = LineMap::new("ab");
        assert_eq!(lm.position(99), Pos::new(1, 3));
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let src = "a\r\nb";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_text(src, 1), Some("a"));
        assert_eq!(lm.position(3), Pos::new(2, 1));
    }
}
