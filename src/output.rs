//! Output formatting for detection results

use crate::detector::Detection;
use crate::error::{Error, Result};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use std::io::Write;
use std::str::FromStr;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table output
    #[default]
    Human,
    /// JSON output
    Json,
    /// No output (silent mode)
    None,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(Error::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Output a detection result
pub fn output_detection<W: Write>(
    detection: &Detection,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Human => output_human(detection, writer),
        OutputFormat::Json => output_json(detection, writer),
        OutputFormat::None => Ok(()),
    }
}

/// Output JSON format
fn output_json<W: Write>(detection: &Detection, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, detection)?;
    writeln!(writer).map_err(Error::OutputFailed)?;
    Ok(())
}

/// Output human-readable table format
fn output_human<W: Write>(detection: &Detection, writer: &mut W) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let rows: [(&str, &str); 5] = [
        ("Site URL", detection.site_url()),
        ("Name", detection.name()),
        ("Description", detection.description()),
        ("REST API URL", detection.rest_api_url()),
        ("Source", if detection.is_local() { "local" } else { "remote" }),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }

    writeln!(writer, "{}", table).map_err(Error::OutputFailed)
}
