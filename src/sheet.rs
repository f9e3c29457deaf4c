//! Spreadsheet input: the first worksheet of a workbook as a [`RowStore`].
//!
//! Uses the calamine crate for reading Excel and OpenDocument files.
//!
//! The first non-blank row holds the column names. Blank header cells are
//! named `__EMPTY`, `__EMPTY_1`, ... and repeated names get `_1`, `_2`, ...
//! suffixes so every column name is unique. Fully blank data rows are
//! dropped; empty cells are stored as absent values. Only columns with a
//! value in the first data row make up the store's column set.

use crate::error::{Error, Result};
use crate::records::{Record, RowStore};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

/// Name given to columns whose header cell is blank.
const EMPTY_HEADER: &str = "__EMPTY";

/// Read the first worksheet of a workbook file.
pub fn read_sheet(path: impl AsRef<Path>) -> Result<RowStore> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::Sheet(format!("Failed to open {}: {}", path.display(), e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Sheet("No sheets found in workbook".to_string()))?
        .map_err(|e| Error::Sheet(e.to_string()))?;
    Ok(rows_from_range(&range))
}

/// Read the first worksheet of a workbook held in memory.
pub fn read_sheet_bytes(bytes: &[u8]) -> Result<RowStore> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::Sheet(format!("Failed to open workbook: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Sheet("No sheets found in workbook".to_string()))?
        .map_err(|e| Error::Sheet(e.to_string()))?;
    Ok(rows_from_range(&range))
}

fn rows_from_range(range: &Range<Data>) -> RowStore {
    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    rows_from_grid(grid)
}

/// Build a row store from a grid of display strings, header row first.
///
/// The column set holds the headers whose cell in the first data row is
/// non-empty, in header order. Records keep every header cell.
pub fn rows_from_grid(grid: Vec<Vec<String>>) -> RowStore {
    let mut rows = grid.into_iter().filter(|row| !is_blank(row));
    let header = match rows.next() {
        Some(header) => header,
        None => return RowStore::default(),
    };
    let headers = header_names(&header);

    let records: Vec<Record> = rows
        .map(|row| {
            let mut record = Record::new();
            for (i, column) in headers.iter().enumerate() {
                let value = row.get(i).filter(|v| !v.is_empty()).cloned();
                record.insert(column.clone(), value);
            }
            record
        })
        .collect();

    let store = RowStore::new(records);
    log::debug!("Read {} row(s) with {} column(s)", store.len(), store.columns().len());
    store
}

/// Make header names unique and non-empty.
fn header_names(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    raw.iter()
        .map(|name| {
            let base = if name.is_empty() {
                EMPTY_HEADER
            } else {
                name.as_str()
            };
            let mut candidate = base.to_string();
            let mut n = 0;
            while seen.contains(&candidate) {
                n += 1;
                candidate = format!("{}_{}", base, n);
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.is_empty())
}

/// Convert a cell value to its display string.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        },
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}
