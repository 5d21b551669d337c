//! CSV loading.
//!
//! A `Dataset` is the whole parsed table: header names plus string cells.
//! Columns are only converted to numbers when they are selected for a fit.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{RegressionError, Result};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Dataset {
    /// Parse a comma-delimited file with a header row.
    ///
    /// Rows whose field count differs from the header are rejected.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| RegressionError::io(path, e))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file);

        let mut headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }
        let rows = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

        let dataset = Self { headers, rows };
        debug!(
            path = %path.display(),
            columns = dataset.headers.len(),
            rows = dataset.rows.len(),
            "parsed dataset"
        );
        Ok(dataset)
    }

    #[cfg(test)]
    fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows: rows.into_iter().map(StringRecord::from).collect(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at (row, col), or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Extract one column as finite numbers.
    ///
    /// Surrounding whitespace is ignored; empty cells, text and NaN/inf are
    /// reported with their 1-based data row.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| RegressionError::MissingColumn {
                missing: vec![name.to_string()],
            })?;

        let mut values = Vec::with_capacity(self.rows.len());
        for (i, record) in self.rows.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => values.push(v),
                _ => {
                    return Err(RegressionError::NonNumeric {
                        column: name.to_string(),
                        row: i + 1,
                        value: raw.to_string(),
                    })
                }
            }
        }
        Ok(values)
    }
}

/// Read the first line of `path` and split it into raw header tokens.
///
/// Only the line terminator is stripped from the last token; names are not
/// trimmed or unquoted.
pub fn read_header_line(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| RegressionError::io(path, e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| RegressionError::io(path, e))?;

    Ok(split_header(&line))
}

fn split_header(line: &str) -> Vec<String> {
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let line = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    line.split(',').map(str::to_string).collect()
}
