//! Sheet export
//!
//! Renders the live sheet into a self-contained document (HTML by default,
//! CSV optionally) and writes it to the export directory.

use crate::error::ExportError;
use crate::model::Sheet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column headers shared by every export format
const HEADERS: [&str; 3] = ["Name", "AG Number", "Status"];

const STYLE: &str = "\
body { font-family: Arial, sans-serif; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }";

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Html,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Csv => "csv",
        }
    }
}

/// A rendered sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub format: ExportFormat,
    pub content: String,
}

/// Bytes ready to be written, with their file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Escape text for inclusion in HTML element content or attributes
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the sheet as a standalone HTML document
pub fn render(sheet: &Sheet) -> Result<Document, ExportError> {
    if sheet.is_empty() {
        return Err(ExportError::EmptySheet);
    }

    let mut html = String::new();
    write_document(&mut html, sheet)?;

    Ok(Document {
        format: ExportFormat::Html,
        content: html,
    })
}

fn write_document(out: &mut impl fmt::Write, sheet: &Sheet) -> fmt::Result {
    let date = sheet.date_label();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Attendance Sheet - {}</title>", date)?;
    writeln!(out, "<style>\n{}\n</style>", STYLE)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Attendance Sheet</h1>")?;
    writeln!(out, "<p>Date: {}</p>", date)?;
    writeln!(out, "<table>")?;
    writeln!(out, "<thead>")?;
    writeln!(
        out,
        "<tr><th>{}</th><th>{}</th><th>{}</th></tr>",
        HEADERS[0], HEADERS[1], HEADERS[2]
    )?;
    writeln!(out, "</thead>")?;
    writeln!(out, "<tbody>")?;
    for entry in &sheet.students {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&entry.name),
            escape_html(&entry.ag_number),
            entry.status.label()
        )?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;
    writeln!(out, "<p>{}</p>", sheet.summary())?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

/// Render the sheet as CSV with a header row
pub fn render_csv(sheet: &Sheet) -> Result<Document, ExportError> {
    if sheet.is_empty() {
        return Err(ExportError::EmptySheet);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for entry in &sheet.students {
        writer.write_record([
            entry.name.as_str(),
            entry.ag_number.as_str(),
            entry.status.label(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;

    Ok(Document {
        format: ExportFormat::Csv,
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Render the sheet in the requested format
pub fn render_as(sheet: &Sheet, format: ExportFormat) -> Result<Document, ExportError> {
    match format {
        ExportFormat::Html => render(sheet),
        ExportFormat::Csv => render_csv(sheet),
    }
}

/// Package a document as `Attendance_<date>.<ext>`
pub fn to_downloadable(document: Document, date: NaiveDate) -> Download {
    Download {
        filename: format!(
            "Attendance_{}.{}",
            date.format("%Y-%m-%d"),
            document.format.extension()
        ),
        bytes: document.content.into_bytes(),
    }
}

/// Write a download into `dir`, creating it if needed
pub fn write_export(dir: &Path, download: &Download) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(&download.filename);
    fs::write(&path, &download.bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), bytes = download.bytes.len(), "attendance sheet exported");
    Ok(path)
}

/// Render, package and write the sheet in one step
pub fn export(sheet: &Sheet, format: ExportFormat, dir: &Path) -> Result<PathBuf, ExportError> {
    let document = render_as(sheet, format)?;
    let download = to_downloadable(document, sheet.date);
    write_export(dir, &download)
}
