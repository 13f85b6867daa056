//! Two-column sample ingestion from CSV files and spreadsheets
//!
//! Rows whose values are not numbers (headers, comments, stray text) are
//! skipped. Rows that are not two-column records at all fail the whole file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{Result, WorkbenchError};

/// Raw `(x, y)` pairs read from a source file
#[derive(Debug, Clone, PartialEq)]
pub struct RawSamples {
    pub source: PathBuf,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl RawSamples {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Load samples from `path`, choosing the parser by extension
pub fn load(path: impl AsRef<Path>) -> Result<RawSamples> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => {
            let file = File::open(path)?;
            let samples = parse_csv(BufReader::new(file), path)?;
            log::info!("loaded {} samples from {}", samples.len(), path.display());
            Ok(samples)
        }
        "xlsx" | "xlsm" | "xls" | "ods" => {
            let samples = read_workbook(path)?;
            log::info!("loaded {} samples from {}", samples.len(), path.display());
            Ok(samples)
        }
        other => Err(WorkbenchError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            format!(".{other}")
        })),
    }
}

/// Parse comma-delimited rows; the first two fields are x and y
pub fn parse_csv<R: BufRead>(reader: R, source: impl Into<PathBuf>) -> Result<RawSamples> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let (Some(first), Some(second)) = (fields.next(), fields.next()) else {
            return Err(WorkbenchError::Ingestion {
                line: line_no,
                reason: format!("expected at least two columns, found '{line}'"),
            });
        };

        match (parse_value(first), parse_value(second)) {
            (Some(a), Some(b)) => {
                x.push(a);
                y.push(b);
            }
            _ => log::debug!("skipping non-numeric row {line_no}: '{line}'"),
        }
    }

    Ok(RawSamples {
        source: source.into(),
        x,
        y,
    })
}

/// Read the first two columns of the first sheet of a workbook
pub fn read_workbook(path: &Path) -> Result<RawSamples> {
    let mut workbook = open_workbook_auto(path).map_err(|e| WorkbenchError::Ingestion {
        line: 0,
        reason: e.to_string(),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| WorkbenchError::Ingestion {
            line: 0,
            reason: "workbook has no sheets".into(),
        })?
        .map_err(|e| WorkbenchError::Ingestion {
            line: 0,
            reason: e.to_string(),
        })?;

    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    parse_rows(range.rows(), first_row, path)
}

/// Parse spreadsheet rows; `first_row` is the 0-based sheet row of the first entry
pub fn parse_rows<'a>(
    rows: impl IntoIterator<Item = &'a [Data]>,
    first_row: usize,
    source: impl Into<PathBuf>,
) -> Result<RawSamples> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row_no = first_row + index + 1;
        let filled = row
            .iter()
            .rposition(|cell| !matches!(cell, Data::Empty))
            .map_or(0, |last| last + 1);
        if filled == 0 {
            continue;
        }
        if filled < 2 || matches!(row[1], Data::Empty) {
            return Err(WorkbenchError::Ingestion {
                line: row_no,
                reason: "expected at least two cells".into(),
            });
        }

        match (cell_value(&row[0]), cell_value(&row[1])) {
            (Some(a), Some(b)) => {
                x.push(a);
                y.push(b);
            }
            _ => log::debug!("skipping non-numeric row {row_no}"),
        }
    }

    Ok(RawSamples {
        source: source.into(),
        x,
        y,
    })
}

fn cell_value(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(v) => Some(*v).filter(|v| v.is_finite()),
        Data::Int(v) => Some(*v as f64),
        Data::String(text) => parse_value(text),
        _ => None,
    }
}

fn parse_value(field: &str) -> Option<f64> {
    let field = field.trim().trim_matches('"');
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
