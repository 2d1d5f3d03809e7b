// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI command implementations.

pub mod build;
pub mod explain;
pub mod link;
pub mod phase;
pub mod pipeline;
pub mod run;
