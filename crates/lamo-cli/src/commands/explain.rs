// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `lamo explain`: look up error codes.

use colored::Colorize;
use lamo_diagnostics::codes::ErrorCodeRegistry;

use crate::error::DriverError;

pub fn cmd_explain(code: Option<&str>) -> Result<(), DriverError> {
    let registry = ErrorCodeRegistry::default();

    let Some(code) = code else {
        for info in registry.all() {
            println!("{}  {:<8} {}", info.code.red().bold(), info.category.to_string(), info.title);
        }
        return Ok(());
    };

    let normalized = code.to_ascii_uppercase();
    let info = registry
        .get(&normalized)
        .ok_or_else(|| DriverError::UnknownErrorCode(code.to_string()))?;

    println!(
        "{}[{}]: {}",
        "error".red().bold(),
        info.code.red().bold(),
        info.title.bold()
    );
    println!();
    println!("  Category: {}", info.category);
    println!();
    for line in info.explanation.lines() {
        println!("  {}", line);
    }
    println!();
    println!("  Run `lamo parse <file>` to see this error in context.");
    Ok(())
}
