// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lamo CLI - transpiles Lamo programs to C and runs them.

mod commands;
mod error;
mod help;
mod output;

use std::env;
use std::process;

use lamo_diagnostics::formatter::DiagnosticFormatter;
use lamo_diagnostics::json::{to_json_report, to_json_string};
use lamo_diagnostics::Diagnostic;

use error::DriverError;

/// How diagnostics and structured dumps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One `file:line:col: error[CODE]: message` line per diagnostic.
    #[default]
    Short,
    /// Source snippet with a caret underline.
    Human,
    Json,
}

impl Format {
    fn parse(s: &str) -> Option<Format> {
        match s {
            "short" => Some(Format::Short),
            "human" => Some(Format::Human),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Global flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub format: Format,
    /// Print phase banners on stderr.
    pub verbose: bool,
}

/// Flags that only `emit` and `build` look at.
#[derive(Debug, Default)]
struct OutputFlags {
    output: Option<String>,
    keep_c: bool,
}

fn main() {
    output::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let code = match run_cli(args) {
        Ok(()) => 0,
        Err(DriverError::ProgramExit { code }) => code,
        // Already rendered by `show_diagnostics`.
        Err(DriverError::Diagnostics { .. }) => 1,
        Err(e) => {
            eprintln!("{}: {}", output::error_label(), e);
            1
        }
    };
    process::exit(code);
}

fn run_cli(args: Vec<String>) -> Result<(), DriverError> {
    let mut opts = Options::default();
    let mut flags = OutputFlags::default();
    let mut positional: Vec<String> = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => opts.verbose = true,
            "--format" => {
                let value = iter
                    .next()
                    .ok_or_else(|| DriverError::Usage("--format needs one of short, human, json".to_string()))?;
                opts.format = parse_format(&value)?;
            }
            "-o" | "--output" => {
                let value = iter
                    .next()
                    .ok_or_else(|| DriverError::Usage(format!("{} needs a path", arg)))?;
                flags.output = Some(value);
            }
            "--keep-c" => flags.keep_c = true,
            other => {
                if let Some(value) = other.strip_prefix("--format=") {
                    opts.format = parse_format(value)?;
                } else {
                    positional.push(arg);
                }
            }
        }
    }

    let Some(command) = positional.first() else {
        help::print_usage();
        return Ok(());
    };
    let file = positional.get(1).map(String::as_str);

    match command.as_str() {
        "lex" => commands::phase::cmd_lex(require_file(file, "lamo lex <file.lamo>")?, opts),
        "parse" => commands::phase::cmd_parse(require_file(file, "lamo parse <file.lamo>")?, opts),
        "emit" => commands::build::cmd_emit(
            require_file(file, "lamo emit <file.lamo> [-o out.c]")?,
            flags.output.as_deref(),
            opts,
        ),
        "build" => commands::build::cmd_build(
            require_file(file, "lamo build <file.lamo> [-o exe] [--keep-c]")?,
            flags.output.as_deref(),
            flags.keep_c,
            opts,
        ),
        "run" => commands::run::cmd_run(require_file(file, "lamo run <file.lamo>")?, opts),
        "explain" => commands::explain::cmd_explain(file),
        "help" | "--help" | "-h" => {
            match file {
                Some(topic) if help::print_command_help(topic) => {}
                Some(topic) => return Err(DriverError::UnknownCommand(topic.to_string())),
                None => help::print_usage(),
            }
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("lamo {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            // `lamo prog.lamo` builds and runs, like the original driver
            if other.ends_with(".lamo") {
                commands::run::cmd_run(other, opts)
            } else {
                help::print_usage();
                Err(DriverError::UnknownCommand(other.to_string()))
            }
        }
    }
}

fn parse_format(value: &str) -> Result<Format, DriverError> {
    Format::parse(value).ok_or_else(|| {
        DriverError::Usage(format!("unknown format `{}` (expected short, human or json)", value))
    })
}

fn require_file<'a>(file: Option<&'a str>, usage: &str) -> Result<&'a str, DriverError> {
    file.ok_or_else(|| DriverError::Usage(usage.to_string()))
}

/// Render diagnostics for one phase in the requested format.
///
/// Text forms go to stderr; the JSON report goes to stdout so it can be piped.
pub fn show_diagnostics(diags: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) {
    match format {
        Format::Short => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(path);
            for diag in diags {
                eprintln!("{}", formatter.format_short(diag));
            }
        }
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(path);
            for diag in diags {
                eprint!("{}", formatter.format(diag));
            }
        }
        Format::Json => {
            let report = to_json_report(diags, source, path, phase);
            println!("{}", to_json_string(&report));
        }
    }
}
