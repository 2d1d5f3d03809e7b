// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Shared pipeline helpers: read a file, parse it, generate C.

use std::fs;

use lamo_ast::decl::Program;
use lamo_diagnostics::ToDiagnostic;

use crate::error::DriverError;
use crate::{output, show_diagnostics, Options};

/// Source text plus its parsed program.
pub struct Frontend {
    pub source: String,
    pub program: Program,
}

pub fn read_source(path: &str) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_string(),
        source,
    })
}

/// Read and parse a .lamo file, reporting the first syntax error.
pub fn run_frontend(path: &str, opts: Options) -> Result<Frontend, DriverError> {
    let source = read_source(path)?;

    match lamo_parser::parse(&source) {
        Ok(program) => {
            if opts.verbose {
                eprintln!(
                    "{}",
                    output::banner_ok(&format!("Parse: {} declarations", program.decls.len()))
                );
            }
            Ok(Frontend { source, program })
        }
        Err(err) => {
            show_diagnostics(&[err.to_diagnostic()], &source, path, "parse", opts.format);
            if opts.verbose {
                eprintln!("\n{}", output::banner_fail("Parse", 1));
            }
            Err(DriverError::Diagnostics { phase: "parse", count: 1 })
        }
    }
}

/// Run the frontend and translate the program to C.
pub fn generate_c(path: &str, opts: Options) -> Result<String, DriverError> {
    let frontend = run_frontend(path, opts)?;
    let c = lamo_codegen::generate(&frontend.program);
    if opts.verbose {
        eprintln!("{}", output::banner_ok(&format!("Codegen: {} lines", c.lines().count())));
    }
    Ok(c)
}

pub fn write_file(path: &str, contents: &str) -> Result<(), DriverError> {
    fs::write(path, contents).map_err(|source| DriverError::Write {
        path: path.to_string(),
        source,
    })
}
