use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Record, Table, REGION_LABEL, YEAR_LABELS};

/// Cells per row: the region label plus one cell per year column.
const EXPECTED_COLUMNS: usize = 1 + YEAR_LABELS.len();

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Everything that can go wrong between a path and a usable [`Table`].
/// All of these are fatal at startup; the dashboard never serves without
/// its dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open spreadsheet {}: {}", .path.display(), .message)]
    Open { path: PathBuf, message: String },

    #[error("workbook {} has no worksheet", .path.display())]
    NoSheet { path: PathBuf },

    #[error("{} contains no data rows", .path.display())]
    Empty { path: PathBuf },

    #[error("row {row} has {found} columns, expected {EXPECTED_COLUMNS}")]
    ColumnCount { row: usize, found: usize },

    #[error("row {row} is missing the \"{column}\" column")]
    MissingColumn { row: usize, column: String },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedExtension { extension: String },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {}", .path.display(), .message)]
    Json { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the crime-incidence table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` – first worksheet; the layout `NewData.xlsx` ships in
/// * `.csv`  – same columns, no header row (row 1 is data)
/// * `.json` – records-oriented array: `[{ "State": ..., "2011": ..., ... }]`
///
/// Column labels are never read from the file; every row must be exactly
/// one region cell plus the 13 year cells of [`YEAR_LABELS`].
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "xlsx" => load_xlsx(path)?,
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => {
            return Err(LoadError::UnsupportedExtension {
                extension: other.to_string(),
            })
        }
    };

    if records.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(Table::new(records))
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

fn load_xlsx(path: &Path) -> Result<Vec<Record>, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| LoadError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoSheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // calamine pads every row to the used-range width, so one width check
    // covers the whole sheet.
    if range.height() > 0 && range.width() != EXPECTED_COLUMNS {
        return Err(LoadError::ColumnCount {
            row: 1,
            found: range.width(),
        });
    }

    let mut records = Vec::with_capacity(range.height());
    for row in range.rows() {
        let region = row[0].to_string();
        let values = row[1..].iter().map(cell_from_xlsx).collect();
        records.push(Record { region, values });
    }
    Ok(records)
}

fn cell_from_xlsx(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        // Dates, durations and cell errors survive as their display text.
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: no header row, `region,2011-value,...,2023-value` per line.
fn load_csv(path: &Path) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row_no = i + 1;
        let record = result.map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        if record.len() != EXPECTED_COLUMNS {
            return Err(LoadError::ColumnCount {
                row: row_no,
                found: record.len(),
            });
        }

        let region = record.get(0).unwrap_or("").to_string();
        let values = record.iter().skip(1).map(guess_cell_type).collect();
        records.push(Record { region, values });
    }
    Ok(records)
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Int(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "State": "Aguascalientes", "2011": 1234, ..., "2023": 987 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Record>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let rows = root.as_array().ok_or_else(|| LoadError::Json {
        path: path.to_path_buf(),
        message: "expected a top-level array of records".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_no = i + 1;
        let obj = row.as_object().ok_or_else(|| LoadError::Json {
            path: path.to_path_buf(),
            message: format!("row {row_no} is not an object"),
        })?;

        let region = obj
            .get(REGION_LABEL)
            .ok_or_else(|| LoadError::MissingColumn {
                row: row_no,
                column: REGION_LABEL.to_string(),
            })?;
        let region = match region {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };

        let mut values = Vec::with_capacity(YEAR_LABELS.len());
        for year in YEAR_LABELS {
            let val = obj.get(year).ok_or_else(|| LoadError::MissingColumn {
                row: row_no,
                column: year.to_string(),
            })?;
            values.push(cell_from_json(val));
        }
        records.push(Record { region, values });
    }
    Ok(records)
}

fn cell_from_json(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Empty,
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn csv_row(region: &str, start: i64) -> String {
        let mut cells = vec![region.to_string()];
        cells.extend((0..YEAR_LABELS.len() as i64).map(|i| (start + i).to_string()));
        cells.join(",")
    }

    #[test]
    fn loads_csv_with_typed_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut body = csv_row("Aguascalientes", 100);
        body.push('\n');
        body.push_str(&csv_row("Baja California", 200));
        body.push('\n');
        fs::write(&path, body).unwrap();

        let table = load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.years.len(), 13);
        assert_eq!(
            table.value("Aguascalientes", "2011"),
            Some(&CellValue::Int(100))
        );
        assert_eq!(
            table.value("Baja California", "2023"),
            Some(&CellValue::Int(212))
        );
    }

    #[test]
    fn non_numeric_cells_pass_through_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "Colima,n/d,2,3,4,5,6,7,8,9,10,11,12,\n").unwrap();

        let table = load(&path).unwrap();
        assert_eq!(
            table.value("Colima", "2011"),
            Some(&CellValue::Text("n/d".into()))
        );
        // Trailing empty field stays empty, not zero.
        assert_eq!(table.value("Colima", "2023"), Some(&CellValue::Empty));
    }

    #[test]
    fn zero_rows_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        match load(&path) {
            Err(LoadError::Empty { .. }) => {}
            other => panic!("expected Empty, got {other:?}"),
        }
    }

    #[test]
    fn column_count_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Sonora,1,2,3\n").unwrap();

        match load(&path) {
            Err(LoadError::ColumnCount { row: 1, found: 4 }) => {}
            other => panic!("expected ColumnCount, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load(Path::new("does-not-exist.csv")).is_err());
        assert!(load(Path::new("does-not-exist.xlsx")).is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        match load(Path::new("data.parquet")) {
            Err(LoadError::UnsupportedExtension { extension }) => {
                assert_eq!(extension, "parquet")
            }
            other => panic!("expected UnsupportedExtension, got {other:?}"),
        }
    }

    #[test]
    fn loads_records_oriented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut record = serde_json::Map::new();
        record.insert("State".to_string(), "Durango".into());
        for (i, year) in YEAR_LABELS.iter().enumerate() {
            record.insert(year.to_string(), (i as i64).into());
        }
        let body = serde_json::to_string(&vec![JsonValue::Object(record)]).unwrap();
        fs::write(&path, body).unwrap();

        let table = load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.value("Durango", "2013"), Some(&CellValue::Int(2)));
    }

    #[test]
    fn json_without_year_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"State": "Durango", "2011": 5}]"#).unwrap();

        match load(&path) {
            Err(LoadError::MissingColumn { row: 1, column }) => assert_eq!(column, "2012"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
