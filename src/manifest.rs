//! Trip manifest parsing.
//!
//! The manifest is a small comma-separated file naming each day of the trip:
//!
//! ```text
//! Date,Place
//! 20210818,Geneva
//! 20210820,Col du Grand Saint Bernard
//! 20210821,Lac du Vieux Emosson
//! ```
//!
//! Columns are located by header name, so their order does not matter and
//! extra columns are ignored. Fields may be double-quoted when a place name
//! contains a comma (`"Zermatt, Valais"`); `""` inside quotes is a literal
//! quote. Rows are collected into a [`BTreeMap`] keyed by date, so a repeated
//! date silently replaces the earlier row.

use crate::types::TripDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Manifest validation error: {0}")]
    Validation(String),
}

const DATE_COLUMN: &str = "Date";
const PLACE_COLUMN: &str = "Place";

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<BTreeMap<TripDate, String>, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}

/// Parse manifest text into a date → place mapping.
pub fn parse_manifest(content: &str) -> Result<BTreeMap<TripDate, String>, ManifestError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut rows = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_line, header)) = rows.next() else {
        return Err(ManifestError::Validation("manifest is empty".into()));
    };
    let header = split_fields(header, header_line)?;
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ManifestError::Parse {
                line: header_line,
                message: format!("missing '{name}' column in header"),
            })
    };
    let date_col = column(DATE_COLUMN)?;
    let place_col = column(PLACE_COLUMN)?;

    let mut trip = BTreeMap::new();
    for (line, row) in rows {
        let fields = split_fields(row, line)?;
        let (Some(date), Some(place)) = (fields.get(date_col), fields.get(place_col)) else {
            return Err(ManifestError::Parse {
                line,
                message: format!("expected at least {} fields", date_col.max(place_col) + 1),
            });
        };
        let date: TripDate = date.parse().map_err(|e| ManifestError::Parse {
            line,
            message: format!("{e}"),
        })?;
        trip.insert(date, place.clone());
    }

    if trip.is_empty() {
        return Err(ManifestError::Validation(
            "manifest has no days, nothing to anchor the index page".into(),
        ));
    }
    Ok(trip)
}

/// Split one line into trimmed fields, honouring double-quoted fields.
fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>, ManifestError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(ManifestError::Parse {
            line: line_no,
            message: "unterminated quoted field".into(),
        });
    }
    fields.push(field.trim().to_string());
    Ok(fields)
}
