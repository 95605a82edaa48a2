//! Spreadsheet ingestion for the two upload endpoints.
//!
//! Only the first sheet is read. Its first row names the columns, every
//! later non-blank row becomes one record. Each field accepts a list of
//! header aliases; the first alias holding a non-blank, non-zero value wins.

use crate::model::{city::NewCity, salary::NewSalary};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

const CITY_NAME: &[&str] = &["city_name", "city name", "city_namte ", "城市名", "城市"];
const YEAR: &[&str] = &["year", "年份"];
const BASE_MIN: &[&str] = &["base_min", "基数下限"];
const BASE_MAX: &[&str] = &["base_max", "基数上限"];
const RATE: &[&str] = &["rate", "缴纳比例"];

const EMPLOYEE_ID: &[&str] = &["employee_id", "员工工号"];
const EMPLOYEE_NAME: &[&str] = &["employee_name", "员工姓名"];
const MONTH: &[&str] = &["month", "月份"];
const SALARY_AMOUNT: &[&str] = &["salary_amount", "工资金额"];

const ACCEPTED_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

#[derive(Debug, Display, Error)]
pub enum IngestError {
    #[display(fmt = "unsupported file {}, upload an Excel file (.xlsx or .xls)", _0)]
    UnsupportedFile(#[error(not(source))] String),

    #[display(fmt = "failed to read workbook: {}", _0)]
    Workbook(calamine::Error),

    #[display(fmt = "workbook contains no sheets")]
    NoSheet,

    #[display(fmt = "file contains no data")]
    NoRows,
}

impl From<calamine::Error> for IngestError {
    fn from(e: calamine::Error) -> Self {
        IngestError::Workbook(e)
    }
}

/// Rejects anything not named like an Excel workbook.
pub fn check_extension(filename: &str) -> Result<(), IngestError> {
    let lower = filename.to_lowercase();
    if ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFile(filename.to_string()))
    }
}

pub fn parse_cities(bytes: Vec<u8>) -> Result<Vec<NewCity>, IngestError> {
    parse_rows(bytes, |row| NewCity {
        city_name: row.text(CITY_NAME),
        year: row.text(YEAR),
        base_min: row.number(BASE_MIN),
        base_max: row.number(BASE_MAX),
        rate: row.number(RATE),
    })
}

pub fn parse_salaries(bytes: Vec<u8>) -> Result<Vec<NewSalary>, IngestError> {
    parse_rows(bytes, |row| NewSalary {
        employee_id: row.text(EMPLOYEE_ID),
        employee_name: row.text(EMPLOYEE_NAME),
        month: row.text(MONTH),
        salary_amount: row.number(SALARY_AMOUNT),
    })
}

fn parse_rows<T>(bytes: Vec<u8>, map: impl Fn(&Row<'_>) -> T) -> Result<Vec<T>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(IngestError::NoSheet)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::NoRows);
    };

    // Duplicate headers resolve to their first column.
    let mut columns: HashMap<String, usize> = HashMap::new();
    for (idx, cell) in header_row.iter().enumerate() {
        if let Some(name) = cell_text(cell) {
            columns.entry(name).or_insert(idx);
        }
    }
    debug!(?columns, "Resolved spreadsheet header");

    let records: Vec<T> = rows
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| map(&Row { columns: &columns, cells }))
        .collect();

    if records.is_empty() {
        return Err(IngestError::NoRows);
    }
    Ok(records)
}

struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    cells: &'a [Data],
}

impl Row<'_> {
    /// First aliased cell holding a usable value.
    fn pick(&self, aliases: &[&str]) -> Option<&Data> {
        aliases
            .iter()
            .filter_map(|alias| self.columns.get(*alias))
            .filter_map(|&idx| self.cells.get(idx))
            .find(|cell| is_present(cell))
    }

    fn text(&self, aliases: &[&str]) -> String {
        self.pick(aliases)
            .and_then(cell_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn number(&self, aliases: &[&str]) -> f64 {
        self.pick(aliases).map(cell_number).unwrap_or(0.0)
    }
}

fn is_present(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => false,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => !s.is_empty(),
        Data::Int(i) => *i != 0,
        Data::Float(f) => *f != 0.0 && !f.is_nan(),
        Data::Bool(b) => *b,
        Data::DateTime(dt) => dt.as_f64() != 0.0,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
    }
}

fn cell_number(cell: &Data) -> f64 {
    match cell {
        Data::Int(i) => *i as f64,
        Data::Float(f) => *f,
        Data::Bool(b) => f64::from(u8::from(*b)),
        Data::DateTime(dt) => dt.as_f64(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            // f64::from_str also takes "NaN" and "inf"; those count as unparseable.
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or_else(|| {
                    debug!(value = %s, "Non-numeric cell read as 0");
                    0.0
                })
        }
        Data::Empty | Data::Error(_) => 0.0,
    }
}
