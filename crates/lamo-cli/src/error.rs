// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Driver errors.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Anything that stops a CLI command.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("reading {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("writing {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("creating scratch directory: {0}")]
    ScratchDir(#[source] io::Error),

    /// The phase printed its own diagnostics.
    #[error("{phase} failed with {count} error(s)")]
    Diagnostics { phase: &'static str, count: usize },

    #[error("encoding JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not run C compiler `{compiler}`: {source} (set LAMO_CC or CC to choose one)")]
    ToolchainMissing { compiler: String, source: io::Error },

    #[error("C compiler `{compiler}` exited with {status}")]
    ToolchainFailed { compiler: String, status: ExitStatus },

    #[error("running {path}: {source}")]
    Spawn { path: String, source: io::Error },

    /// The compiled program ran and exited non-zero; its status is forwarded.
    #[error("program exited with status {code}")]
    ProgramExit { code: i32 },

    #[error("unknown command `{0}` (run `lamo help` for a list)")]
    UnknownCommand(String),

    #[error("unknown error code `{0}`")]
    UnknownErrorCode(String),

    #[error("usage: {0}")]
    Usage(String),
}
