// SPDX-License-Identifier: (MIT OR Apache-2.0)

pub struct CodegenConfig {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Emit the "generated by" comment on the first line.
    pub header: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            header: true,
        }
    }
}
