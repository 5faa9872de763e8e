//! Output rendering for CLI commands
//!
//! Text output is one line per result, tab-separated where a result has
//! several fields. JSON output is one compact document per result.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use oratype_core::DataType;
use serde::Serialize;
use serde_json::json;
use std::cmp::Ordering;
use std::io::Write;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Name, storage size and nullability of a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub name: String,
    pub size: usize,
    pub nullable: bool,
}

impl TypeSummary {
    pub fn of(column: Option<String>, ty: &dyn DataType) -> Self {
        Self {
            column,
            name: ty.name(),
            size: ty.storage_size(),
            nullable: ty.is_nullable(),
        }
    }
}

/// Writes command results in the selected format
pub struct Printer<'a, W: Write> {
    out: &'a mut W,
    format: OutputFormat,
    color: bool,
}

impl<'a, W: Write> Printer<'a, W> {
    pub fn new(out: &'a mut W, format: OutputFormat, color: bool) -> Self {
        Self { out, format, color }
    }

    pub fn summary(&mut self, summary: &TypeSummary) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(summary),
            OutputFormat::Text => {
                let line = self.summary_line(summary);
                writeln!(self.out, "{}", line)?;
                Ok(())
            }
        }
    }

    pub fn summaries(&mut self, summaries: &[TypeSummary]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&summaries),
            OutputFormat::Text => {
                for summary in summaries {
                    let line = self.summary_line(summary);
                    writeln!(self.out, "{}", line)?;
                }
                Ok(())
            }
        }
    }

    /// Result of a validity or equality predicate
    pub fn flag(&mut self, value: bool) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&json!({ "value": value })),
            OutputFormat::Text if self.color => {
                let word = if value {
                    "true".green()
                } else {
                    "false".red()
                };
                writeln!(self.out, "{}", word)?;
                Ok(())
            }
            OutputFormat::Text => {
                writeln!(self.out, "{}", value)?;
                Ok(())
            }
        }
    }

    /// A formatted value
    pub fn text(&mut self, value: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&json!({ "value": value })),
            OutputFormat::Text => {
                writeln!(self.out, "{}", value)?;
                Ok(())
            }
        }
    }

    /// A comparison result as -1, 0 or 1
    pub fn ordering(&mut self, ordering: Ordering) -> Result<()> {
        let value = ordering as i8;
        match self.format {
            OutputFormat::Json => self.json(&json!({ "value": value })),
            OutputFormat::Text => {
                writeln!(self.out, "{}", value)?;
                Ok(())
            }
        }
    }

    fn summary_line(&self, summary: &TypeSummary) -> String {
        let name = if self.color {
            summary.name.bold().to_string()
        } else {
            summary.name.clone()
        };
        let line = format!(
            "{}\tsize={}\tnullable={}",
            name, summary.size, summary.nullable
        );
        match &summary.column {
            Some(column) => format!("{}\t{}", column, line),
            None => line,
        }
    }

    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut *self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
