//! Rendering of command results as a table, JSON or CSV.
//!
//! Every command turns its result into a list of row structs deriving both
//! [`Serialize`] and [`Tabled`]; the selected [`OutputFormat`] then decides
//! how the rows reach the writer.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Writes `rows` to `out` in `format`.
pub fn write_rows<T, W>(
    format: OutputFormat,
    rows: &[T],
    out: &mut W,
) -> Result<()>
where
    T: Serialize + Tabled,
    W: Write,
{
    match format {
        OutputFormat::Table => write_table(rows, out),
        OutputFormat::Json => write_json(rows, out),
        OutputFormat::Csv => write_csv(rows, out),
    }
}

pub fn write_table<T, W>(
    rows: &[T],
    out: &mut W,
) -> Result<()>
where
    T: Tabled,
    W: Write,
{
    if rows.is_empty() {
        writeln!(out, "(empty)")?;
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    writeln!(out, "{table}")?;
    Ok(())
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<T, W>(
    value: &T,
    out: &mut W,
) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut *out, value).context("JSON serialization failed")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_csv<T, W>(
    rows: &[T],
    out: &mut W,
) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row).context("CSV serialization failed")?;
    }
    writer.flush()?;
    Ok(())
}
