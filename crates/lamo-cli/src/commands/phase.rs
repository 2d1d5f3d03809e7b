// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compiler phase inspection commands: lex, parse.

use colored::Colorize;
use lamo_ast::token::TokenKind;

use super::pipeline::{read_source, run_frontend};
use crate::error::DriverError;
use crate::{output, Format, Options};

pub fn cmd_lex(path: &str, opts: Options) -> Result<(), DriverError> {
    let source = read_source(path)?;
    let tokens = lamo_lexer::tokenize(&source);

    if opts.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    for tok in &tokens {
        let kind = format!("{:?}", tok.kind);
        let line = format!("{:>4}:{:<3} {:<10} {}", tok.pos.line, tok.pos.column, kind, tok.lexeme);
        if tok.is(TokenKind::Unknown) {
            println!("{}", line.red());
        } else {
            println!("{}", line.trim_end());
        }
    }

    if opts.verbose {
        let unknown = tokens.iter().filter(|t| t.is(TokenKind::Unknown)).count();
        if unknown > 0 {
            eprintln!(
                "\n{}",
                output::banner(&format!("Lex: {} tokens, {} unknown", tokens.len(), unknown))
            );
        } else {
            eprintln!("\n{}", output::banner_ok(&format!("Lex: {} tokens", tokens.len())));
        }
    }
    Ok(())
}

pub fn cmd_parse(path: &str, opts: Options) -> Result<(), DriverError> {
    let frontend = run_frontend(path, opts)?;

    if opts.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&frontend.program)?);
        return Ok(());
    }

    for decl in &frontend.program.decls {
        println!("{:#?}", decl);
    }
    Ok(())
}
