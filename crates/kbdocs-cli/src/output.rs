//! Command output
//!
//! Human mode prints progress notes on stderr and the command's result on
//! stdout. JSON mode keeps stdout for exactly one result envelope per
//! command, `{"command": ..., "ok": ..., "data": ...}`, and writes warnings
//! and errors to stderr as single-line JSON objects.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Result document printed once per command in JSON mode
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub command: &'a str,
    pub ok: bool,
    pub data: Value,
}

/// Sink for everything a command shows the user
pub trait OutputFormatter {
    /// Progress note, never part of the result
    fn progress(&self, message: &str);
    fn success(&self, message: &str);
    /// One line of the human-readable result
    fn line(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    /// Machine-readable result of the command
    fn result(&self, ok: bool, data: Value);
}

/// Checkmarks and indentation for terminals
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn progress(&self, message: &str) {
        eprintln!("{message}");
    }
    fn success(&self, message: &str) {
        println!("\u{2713} {message}");
    }
    fn line(&self, message: &str) {
        println!("  {message}");
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {message}");
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {message}");
    }
    fn result(&self, _ok: bool, _data: Value) {}
}

/// One envelope on stdout, diagnostics on stderr
pub struct JsonFormatter {
    command: &'static str,
}

impl JsonFormatter {
    pub fn new(command: &'static str) -> Self {
        Self { command }
    }

    fn envelope(&self, ok: bool, data: Value) -> Envelope<'_> {
        Envelope {
            command: self.command,
            ok,
            data,
        }
    }

    fn diagnostic(&self, level: &str, message: &str) -> Value {
        json!({"command": self.command, "level": level, "message": message})
    }
}

impl OutputFormatter for JsonFormatter {
    fn progress(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn line(&self, _message: &str) {}
    fn warn(&self, message: &str) {
        eprintln!("{}", self.diagnostic("warning", message));
    }
    fn error(&self, message: &str) {
        eprintln!("{}", self.diagnostic("error", message));
    }
    fn result(&self, ok: bool, data: Value) {
        match serde_json::to_string_pretty(&self.envelope(ok, data)) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("{}", self.diagnostic("error", &e.to_string())),
        }
    }
}

pub fn get_formatter(format: OutputFormat, command: &'static str) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(command)),
    }
}

/// Serializes `value` as the command's result
pub fn emit_result<T: Serialize>(formatter: &dyn OutputFormatter, ok: bool, value: &T) -> Result<()> {
    let data = serde_json::to_value(value).context("Failed to serialize output")?;
    formatter.result(ok, data);
    Ok(())
}
