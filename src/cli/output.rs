use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{GrasshopperError, Result, StructuredError};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
    /// Plain text without colors
    Plain,
}

impl OutputFormat {
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, Self::Human)
    }

    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Envelope for every JSON document written to stdout.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub status: JsonStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonStatus {
    Ok,
    Error(StructuredError),
}

pub fn json_ok<T: Serialize>(data: T) -> JsonResponse<T> {
    JsonResponse {
        status: JsonStatus::Ok,
        timestamp: Utc::now(),
        version: crate::VERSION.to_string(),
        data,
    }
}

#[must_use]
pub fn json_error(err: &GrasshopperError) -> JsonResponse<serde_json::Value> {
    JsonResponse {
        status: JsonStatus::Error(err.to_structured()),
        timestamp: Utc::now(),
        version: crate::VERSION.to_string(),
        data: serde_json::Value::Null,
    }
}

/// # Errors
///
/// Fails only if `value` cannot be serialized.
pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

/// Line-oriented builder for human/plain output.
pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
    colors: bool,
}

impl HumanLayout {
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            lines: Vec::new(),
            key_width: 16,
            colors: format.use_colors(),
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        let line = if self.colors {
            style(text).bold().to_string()
        } else {
            text.to_string()
        };
        self.lines.push(line);
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        let key = if self.colors {
            style(padded).dim().to_string()
        } else {
            padded
        };
        self.lines.push(format!("{key} {value}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}
