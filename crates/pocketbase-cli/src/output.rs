//! Output formatting helpers.
//!
//! Results go to stdout; progress and hints go to stderr.

use anyhow::Result;
use colored::Colorize;
use pocketbase::Record;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a dimmed note to stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a record, one line per record unless `pretty`.
pub fn record(record: &Record, pretty: bool) -> Result<()> {
    if pretty {
        json_pretty(record)
    } else {
        json(record)
    }
}
