//! JSON formatter

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

/// Wrap a result with the command name and generation time
pub fn envelope<T: Serialize>(command: &str, result: &T) -> Result<Value> {
    let result = serde_json::to_value(result).context("Error serializing results")?;
    Ok(json!({
        "command": command,
        "generatedAt": Utc::now().to_rfc3339(),
        "result": result,
    }))
}

pub fn print_json<T: Serialize>(command: &str, result: &T) -> Result<()> {
    let value = envelope(command, result)?;
    let json = serde_json::to_string_pretty(&value).context("Error serializing results")?;
    println!("{}", json);
    Ok(())
}
