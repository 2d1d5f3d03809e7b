// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Invoking the external C compiler for build and run.

use std::env;
use std::path::Path;
use std::process;

use crate::error::DriverError;

/// The C compiler: `LAMO_CC`, then `CC`, then plain `cc`.
pub fn c_compiler() -> String {
    ["LAMO_CC", "CC"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|cc| !cc.trim().is_empty())
        .unwrap_or_else(|| "cc".to_string())
}

/// Extra flags from `LAMO_CFLAGS`, whitespace separated.
fn extra_flags() -> Vec<String> {
    env::var("LAMO_CFLAGS")
        .map(|flags| flags.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Compile one C file into an executable.
pub fn compile_c(c_path: &Path, bin_path: &Path, verbose: bool) -> Result<(), DriverError> {
    let compiler = c_compiler();

    let mut cmd = process::Command::new(&compiler);
    cmd.arg("-Wall");
    cmd.args(extra_flags());
    cmd.arg("-o").arg(bin_path).arg(c_path);

    if verbose {
        eprintln!("{:?}", cmd);
    }

    let status = cmd.status().map_err(|source| DriverError::ToolchainMissing {
        compiler: compiler.clone(),
        source,
    })?;

    if !status.success() {
        return Err(DriverError::ToolchainFailed { compiler, status });
    }

    Ok(())
}
