// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Block-scoped record of which `let` bindings hold strings.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct Scopes {
    frames: Vec<HashMap<String, bool>>,
}

impl Scopes {
    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Record a binding in the innermost scope, shadowing outer ones.
    pub fn declare(&mut self, name: &str, is_string: bool) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), is_string);
        }
    }

    /// Whether the innermost visible binding of `name` is a string.
    /// Unknown names count as integers.
    pub fn is_string(&self, name: &str) -> bool {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
            .unwrap_or(false)
    }
}
