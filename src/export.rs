//! CSV export of query results.
//!
//! Every field is double-quoted, the header row comes first and each line
//! ends with `\n`.

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::db::{QueryResult, Value};

pub fn write_csv<W: Write>(result: &QueryResult, out: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    // A statement without a result set has no header to write
    if !result.columns.is_empty() {
        writer.write_record(&result.columns)?;
    }
    for row in result.rows() {
        writer.write_record(row.iter().map(Value::to_export_string))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(result: &QueryResult) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(result, &mut buf).context("Failed to encode CSV")?;
    String::from_utf8(buf).context("CSV output is not valid UTF-8")
}

/// Writes `result` to `path`, replacing any existing file.
pub fn export_csv(result: &QueryResult, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    write_csv(result, file)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;

    info!(path = %path.display(), rows = result.row_count(), "exported result to CSV");
    Ok(())
}

/// `<dir>/query_<timestamp>.csv`
pub fn default_export_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("query_{}.csv", stamp))
}
