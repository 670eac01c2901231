//! Output formatting for CLI commands.

use anyhow::Result;
use serde::Serialize;

/// Writes a value as pretty-printed JSON to stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
