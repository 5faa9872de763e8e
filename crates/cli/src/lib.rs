//! # Oratype CLI
//!
//! Command-line interface over the oratype catalog.
//!
//! ## Commands
//!
//! - `describe` - Show name, storage size and nullability of a type signature
//! - `date` - Validate, format or compare DATE values
//! - `timestamp` - Validate, format or compare TIMESTAMP values
//! - `range` - Check whether a number fits a NUMBER declaration
//! - `text` - Validate, format or compare character values
//! - `catalog` - Describe every column of a TOML catalog file
//!

pub mod catalog;
pub mod output;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use oratype_core::{
    CharType, CharacterType, DateParts, DateType, NCharType, NVarchar2Type, NumberType,
    TimestampParts, TimestampType, TypeDecl, Varchar2Type,
};
use output::{OutputFormat, Printer, TypeSummary};
use std::io::Write;
use std::path::PathBuf;

pub use oratype_core;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "oratype",
    version,
    about = "Validate, format and compare values of engine-compatible scalar types"
)]
pub struct Cli {
    /// Log filter directive, e.g. `debug` or `oratype_core=trace`
    #[arg(long, global = true, env = "ORATYPE_LOG")]
    pub log_level: Option<String>,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "ORATYPE_FORMAT"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse arguments from the process command line
    pub fn from_env() -> Self {
        Self::parse()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show name, storage size and nullability of a type signature
    Describe {
        /// Type signature, e.g. `NUMBER(10,2)`
        signature: String,
        /// Declare the column NOT NULL
        #[arg(long)]
        not_null: bool,
    },
    /// DATE values
    Date {
        #[command(subcommand)]
        action: DateAction,
    },
    /// TIMESTAMP values
    Timestamp {
        #[command(subcommand)]
        action: TimestampAction,
    },
    /// Check whether a number is storable in a NUMBER declaration
    Range {
        /// NUMBER signature, e.g. `NUMBER(3,1)`
        signature: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Character values
    Text {
        #[command(subcommand)]
        action: TextAction,
    },
    /// Describe every column of a TOML catalog file
    Catalog {
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum DateAction {
    /// Check that the components form an existing date
    Validate(DateArgs),
    /// Render the date in the engine's default format
    Format(DateArgs),
    /// Print -1, 0 or 1 comparing two dates
    Compare {
        /// Y,M,D[,H,MI,S]
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        left: Vec<i32>,
        /// Y,M,D[,H,MI,S]
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        right: Vec<i32>,
    },
}

#[derive(Debug, Args)]
pub struct DateArgs {
    #[arg(allow_negative_numbers = true)]
    pub year: i32,
    pub month: i32,
    pub day: i32,
    #[arg(default_value_t = 0)]
    pub hour: i32,
    #[arg(default_value_t = 0)]
    pub minute: i32,
    #[arg(default_value_t = 0)]
    pub second: i32,
}

impl From<&DateArgs> for DateParts {
    fn from(args: &DateArgs) -> Self {
        DateParts::new(args.year, args.month, args.day).with_time(args.hour, args.minute, args.second)
    }
}

#[derive(Debug, Subcommand)]
pub enum TimestampAction {
    /// Check that the components form a storable timestamp
    Validate(TimestampArgs),
    /// Render the timestamp in the engine's default format
    Format(TimestampArgs),
    /// Print -1, 0 or 1 comparing two timestamps
    Compare {
        /// Y,M,D,H,MI,S[,FRACTION]
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        left: Vec<i64>,
        /// Y,M,D,H,MI,S[,FRACTION]
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        right: Vec<i64>,
        /// Offset of the left value from UTC, in minutes
        #[arg(long, allow_negative_numbers = true)]
        left_offset: Option<i32>,
        /// Offset of the right value from UTC, in minutes
        #[arg(long, allow_negative_numbers = true)]
        right_offset: Option<i32>,
    },
}

#[derive(Debug, Args)]
pub struct TimestampArgs {
    /// TIMESTAMP signature, e.g. `TIMESTAMP(3) WITH TIME ZONE`
    #[arg(long = "type", default_value = "TIMESTAMP")]
    pub signature: String,
    #[arg(allow_negative_numbers = true)]
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    /// Fractional second, as an integer of up to `precision` digits
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub fraction: i64,
    /// Offset from UTC in minutes
    #[arg(long, allow_negative_numbers = true)]
    pub tz_offset: Option<i32>,
}

impl From<&TimestampArgs> for TimestampParts {
    fn from(args: &TimestampArgs) -> Self {
        TimestampParts {
            fraction: args.fraction,
            tz_offset: args.tz_offset,
            ..TimestampParts::new(
                args.year,
                args.month,
                args.day,
                args.hour,
                args.minute,
                args.second,
            )
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum TextAction {
    /// Check that a value fits the declared length
    Validate { signature: String, value: String },
    /// Render a value the way the engine stores it
    Format { signature: String, value: String },
    /// Compare two values with the type's equality rules
    Equal {
        signature: String,
        left: String,
        right: String,
    },
}

// ============================================================================
// Runner
// ============================================================================

/// Execute `cli`, writing results to `out`
pub fn run<W: Write>(cli: Cli, out: &mut W, color: bool) -> Result<()> {
    let mut printer = Printer::new(out, cli.format, color);
    tracing::debug!(command = ?cli.command, "running command");

    match cli.command {
        Command::Describe {
            signature,
            not_null,
        } => {
            let ty = parse_decl(&signature)?.build(!not_null)?;
            printer.summary(&TypeSummary::of(None, &*ty))
        }
        Command::Date { action } => run_date(action, &mut printer),
        Command::Timestamp { action } => run_timestamp(action, &mut printer),
        Command::Range { signature, value } => {
            let number = match parse_decl(&signature)? {
                TypeDecl::Number { precision, scale } => NumberType::new(precision, scale, true)?,
                other => bail!("{} is not a NUMBER type", other.keyword()),
            };
            printer.flag(number.is_in_range(value))
        }
        Command::Text { action } => run_text(action, &mut printer),
        Command::Catalog { path } => {
            let catalog = catalog::Catalog::load(&path)?;
            let summaries = catalog.describe()?;
            printer.summaries(&summaries)
        }
    }
}

fn run_date<W: Write>(action: DateAction, printer: &mut Printer<'_, W>) -> Result<()> {
    let date = DateType::default();
    match action {
        DateAction::Validate(args) => printer.flag(date.is_valid_date(&DateParts::from(&args))),
        DateAction::Format(args) => printer.text(&date.format_date(&DateParts::from(&args))?),
        DateAction::Compare { left, right } => {
            let left = date_parts(&left).context("--left")?;
            let right = date_parts(&right).context("--right")?;
            printer.ordering(DateType::compare_dates(&left, &right))
        }
    }
}

fn run_timestamp<W: Write>(action: TimestampAction, printer: &mut Printer<'_, W>) -> Result<()> {
    match action {
        TimestampAction::Validate(args) => {
            let timestamp = timestamp_type(&args.signature)?;
            printer.flag(timestamp.is_valid_timestamp(&TimestampParts::from(&args)))
        }
        TimestampAction::Format(args) => {
            let timestamp = timestamp_type(&args.signature)?;
            printer.text(&timestamp.format_timestamp(&TimestampParts::from(&args))?)
        }
        TimestampAction::Compare {
            left,
            right,
            left_offset,
            right_offset,
        } => {
            let left = timestamp_parts(&left, left_offset).context("--left")?;
            let right = timestamp_parts(&right, right_offset).context("--right")?;
            printer.ordering(TimestampType::compare_timestamps(&left, &right))
        }
    }
}

fn run_text<W: Write>(action: TextAction, printer: &mut Printer<'_, W>) -> Result<()> {
    match action {
        TextAction::Validate { signature, value } => {
            let ty = character_type(&signature)?;
            printer.flag(ty.fits(value.as_bytes()))
        }
        TextAction::Format { signature, value } => {
            let ty = character_type(&signature)?;
            printer.text(&ty.format_text(&value)?)
        }
        TextAction::Equal {
            signature,
            left,
            right,
        } => {
            let ty = character_type(&signature)?;
            printer.flag(ty.values_equal(left.as_bytes(), right.as_bytes()))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_decl(signature: &str) -> Result<TypeDecl> {
    signature
        .parse::<TypeDecl>()
        .with_context(|| format!("Failed to parse type signature '{}'", signature))
}

fn timestamp_type(signature: &str) -> Result<TimestampType> {
    match parse_decl(signature)? {
        TypeDecl::Timestamp {
            precision,
            with_time_zone,
        } => Ok(TimestampType::new(
            i32::try_from(precision).unwrap_or(i32::MAX),
            with_time_zone,
            true,
        )),
        other => bail!("{} is not a TIMESTAMP type", other.keyword()),
    }
}

fn character_type(signature: &str) -> Result<Box<dyn CharacterType>> {
    Ok(match parse_decl(signature)? {
        TypeDecl::Char { length } => Box::new(CharType::new(length, true)?),
        TypeDecl::NChar { length } => Box::new(NCharType::new(length, true)?),
        TypeDecl::Varchar2 { max_length } => Box::new(Varchar2Type::new(max_length, true)?),
        TypeDecl::NVarchar2 { max_length } => Box::new(NVarchar2Type::new(max_length, true)?),
        other => bail!("{} is not a character type", other.keyword()),
    })
}

fn date_parts(values: &[i32]) -> Result<DateParts> {
    match *values {
        [year, month, day] => Ok(DateParts::new(year, month, day)),
        [year, month, day, hour, minute, second] => {
            Ok(DateParts::new(year, month, day).with_time(hour, minute, second))
        }
        _ => bail!("expected Y,M,D or Y,M,D,H,MI,S but got {} values", values.len()),
    }
}

fn timestamp_parts(values: &[i64], tz_offset: Option<i32>) -> Result<TimestampParts> {
    let (fields, fraction) = match values.len() {
        6 => (values, 0),
        7 => (&values[..6], values[6]),
        n => bail!("expected Y,M,D,H,MI,S[,FRACTION] but got {} values", n),
    };
    let mut ints = [0i32; 6];
    for (slot, value) in ints.iter_mut().zip(fields) {
        *slot = i32::try_from(*value).with_context(|| format!("{} is out of range", value))?;
    }
    let [year, month, day, hour, minute, second] = ints;
    Ok(TimestampParts {
        fraction,
        tz_offset,
        ..TimestampParts::new(year, month, day, hour, minute, second)
    })
}

// ============================================================================
// Tests
// ============================================================================
