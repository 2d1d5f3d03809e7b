// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Build a program in a scratch directory and run it.

use std::env::consts::EXE_SUFFIX;
use std::process;

use super::link::compile_c;
use super::pipeline::{generate_c, write_file};
use crate::error::DriverError;
use crate::{output, Options};

pub fn cmd_run(path: &str, opts: Options) -> Result<(), DriverError> {
    let c = generate_c(path, opts)?;

    let scratch = tempfile::tempdir().map_err(DriverError::ScratchDir)?;
    let c_path = scratch.path().join("lamo_exec.c");
    let bin_path = scratch.path().join(format!("lamo_exec{}", EXE_SUFFIX));
    write_file(&c_path.to_string_lossy(), &c)?;
    compile_c(&c_path, &bin_path, opts.verbose)?;

    if opts.verbose {
        eprintln!("{}", output::banner(&format!("Running {}", output::file_path(path))));
    }

    let status = process::Command::new(&bin_path)
        .status()
        .map_err(|source| DriverError::Spawn {
            path: bin_path.display().to_string(),
            source,
        })?;

    if status.success() {
        return Ok(());
    }
    // Killed by a signal: no code to forward.
    Err(DriverError::ProgramExit { code: status.code().unwrap_or(1) })
}
