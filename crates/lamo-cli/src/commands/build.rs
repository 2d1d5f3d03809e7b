// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Output commands: emit C text, build an executable.

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use super::link::compile_c;
use super::pipeline::{generate_c, write_file};
use crate::error::DriverError;
use crate::{output, Options};

pub fn cmd_emit(path: &str, out: Option<&str>, opts: Options) -> Result<(), DriverError> {
    let c = generate_c(path, opts)?;

    match out {
        Some(out_path) => {
            write_file(out_path, &c)?;
            if opts.verbose {
                eprintln!("  {} {}", output::arrow(), output::file_path(out_path));
            }
        }
        None => print!("{}", c),
    }
    Ok(())
}

pub fn cmd_build(path: &str, out: Option<&str>, keep_c: bool, opts: Options) -> Result<(), DriverError> {
    let c = generate_c(path, opts)?;

    let bin_path = match out {
        Some(p) => PathBuf::from(p),
        None => default_binary_path(path),
    };

    if keep_c {
        let c_path = bin_path.with_extension("c");
        write_file(&c_path.to_string_lossy(), &c)?;
        compile_c(&c_path, &bin_path, opts.verbose)?;
    } else {
        let scratch = tempfile::tempdir().map_err(DriverError::ScratchDir)?;
        let c_path = scratch.path().join("lamo_exec.c");
        write_file(&c_path.to_string_lossy(), &c)?;
        compile_c(&c_path, &bin_path, opts.verbose)?;
    }

    if opts.verbose {
        eprintln!("{}", output::banner_ok("Build"));
        eprintln!("  {} {}", output::arrow(), output::file_path(&bin_path.to_string_lossy()));
    }
    Ok(())
}

/// `prog.lamo` builds `prog` (or `prog.exe`) next to the source.
fn default_binary_path(source: &str) -> PathBuf {
    let stem = Path::new(source).with_extension("");
    let mut name = stem.into_os_string();
    name.push(EXE_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_named_after_source() {
        let expected = format!("dir/prog{}", EXE_SUFFIX);
        assert_eq!(default_binary_path("dir/prog.lamo"), PathBuf::from(expected));
    }
}
