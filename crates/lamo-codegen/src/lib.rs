// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Lamo code generator: program AST → C source text.
//!
//! Every value is a C `int` except `let` bindings whose initializer is
//! string-typed, which become `const char*`. See [`CodeGenerator`].

mod config;
mod generator;
mod runtime;
mod scope;

pub use config::CodegenConfig;
pub use generator::CodeGenerator;

use lamo_ast::decl::Program;

/// Generate C source with the default configuration.
pub fn generate(program: &Program) -> String {
    generate_with_config(program, &CodegenConfig::default())
}

pub fn generate_with_config(program: &Program, config: &CodegenConfig) -> String {
    CodeGenerator::new(config).generate(program)
}
