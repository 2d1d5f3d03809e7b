// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use colored::Colorize;
use crate::output;

pub fn print_usage() {
    println!(
        "{} {} - A tiny scripting language that compiles to C",
        output::title("Lamo"),
        output::version(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("lamo"),
        output::arg("<command>"),
        output::arg("[args]")
    );
    println!(
        "       {} {}       Build and run a program",
        output::command("lamo"),
        output::arg("<file.lamo>")
    );
    println!();
    println!("{}", output::section_header("Commands:"));
    println!("  {} {}       Build and run a program", output::command("run"), output::arg("<file>"));
    println!("  {} {}     Compile to a native executable", output::command("build"), output::arg("<file>"));
    println!("  {} {}      Print the generated C source", output::command("emit"), output::arg("<file>"));
    println!("  {} {}       Print the token stream", output::command("lex"), output::arg("<file>"));
    println!("  {} {}     Print the syntax tree", output::command("parse"), output::arg("<file>"));
    println!("  {} {}   Explain an error code", output::command("explain"), output::arg("<code>"));
    println!("  {} {}   Show help for a command", output::command("help"), output::arg("[command]"));
    println!("  {}          Show version", output::command("version"));

    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {} {}  Diagnostic style: short (default), human, json",
        output::arg("--format"), output::arg("<fmt>"));
    println!("  {}          Print phase banners on stderr", output::arg("--verbose"));
    println!();
    println!("{}", output::section_header("Environment:"));
    println!("  {}   C compiler to use (falls back to {}, then {})",
        output::arg("LAMO_CC"), output::arg("CC"), output::command("cc"));
    println!("  {}  Extra flags passed to the C compiler", output::arg("LAMO_CFLAGS"));
}

/// Detailed help for one command. Returns false if the command is unknown.
pub fn print_command_help(command: &str) -> bool {
    match command {
        "lex" => print_lex_help(),
        "parse" => print_parse_help(),
        "emit" => print_emit_help(),
        "build" => print_build_help(),
        "run" => print_run_help(),
        "explain" => print_explain_help(),
        _ => return false,
    }
    true
}

fn print_lex_help() {
    println!("{}", output::section_header("Lex"));
    println!();
    println!("Tokenize a Lamo source file and display the token stream.");
    println!("Each line shows line:column, the token kind and its text.");
    println!();
    println!("{}: {} {} {}", "Usage".yellow(),
        output::command("lamo"),
        output::command("lex"),
        output::arg("<file.lamo>"));
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}  Output tokens as structured JSON", output::arg("--format json"));
}

fn print_parse_help() {
    println!("{}", output::section_header("Parse"));
    println!();
    println!("Parse a Lamo source file and display the abstract syntax tree.");
    println!("Parsing stops at the first syntax error.");
    println!();
    println!("{}: {} {} {}", "Usage".yellow(),
        output::command("lamo"),
        output::command("parse"),
        output::arg("<file.lamo>"));
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}  Output the tree as structured JSON", output::arg("--format json"));
}

fn print_emit_help() {
    println!("{}", output::section_header("Emit"));
    println!();
    println!("Translate a Lamo source file to C and print it, or write it to a file.");
    println!();
    println!("{}: {} {} {} {}", "Usage".yellow(),
        output::command("lamo"),
        output::command("emit"),
        output::arg("<file.lamo>"),
        output::arg("[-o out.c]"));
}

fn print_build_help() {
    println!("{}", output::section_header("Build"));
    println!();
    println!("Translate a Lamo source file to C and compile it with the C compiler.");
    println!("The executable is named after the source file unless -o is given.");
    println!();
    println!("{}: {} {} {} {} {}", "Usage".yellow(),
        output::command("lamo"),
        output::command("build"),
        output::arg("<file.lamo>"),
        output::arg("[-o exe]"),
        output::arg("[--keep-c]"));
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {} {}  Executable path", output::arg("-o"), output::arg("<path>"));
    println!("  {}    Keep the generated C next to the executable", output::arg("--keep-c"));
}

fn print_run_help() {
    println!("{}", output::section_header("Run"));
    println!();
    println!("Build a Lamo program in a scratch directory and run it.");
    println!("The exit status of the program becomes the exit status of lamo.");
    println!();
    println!("{}: {} {} {}", "Usage".yellow(),
        output::command("lamo"),
        output::command("run"),
        output::arg("<file.lamo>"));
}

fn print_explain_help() {
    println!("{}", output::section_header("Explain"));
    println!();
    println!("Display detailed information about a compiler error code.");
    println!("Without a code, list every known code.");
    println!();
    println!("{}: {} {} {}", "Usage".yellow(),
        output::command("lamo"),
        output::command("explain"),
        output::arg("[ERROR_CODE]"));
    println!();
    println!("{}", output::section_header("Examples:"));
    println!("  {} {} {}     Explain error E0100",
        output::command("lamo"),
        output::command("explain"),
        output::arg("E0100"));
}
