use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Year columns
// ---------------------------------------------------------------------------

/// Column labels for everything after the region column.
///
/// The input file carries no header row (row 1 is already data), so the
/// labels are assigned positionally. A file whose rows are not exactly
/// `1 + YEAR_LABELS.len()` cells wide is rejected at load time.
pub const YEAR_LABELS: [&str; 13] = [
    "2011", "2012", "2013", "2014", "2015", "2016", "2017", "2018", "2019", "2020", "2021",
    "2022", "2023",
];

/// Label of the region column, as shown in table headers.
pub const REGION_LABEL: &str = "State";

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, kept exactly as loaded.
/// No coercion happens anywhere downstream; non-numeric cells flow through
/// the chart/table derivation unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl CellValue {
    /// Numeric view for chart plotting. Text and empty cells have no
    /// position on the y-axis and are skipped by the chart renderer.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the spreadsheet
// ---------------------------------------------------------------------------

/// A single region's row: the label plus one value per year column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub region: String,
    /// Aligned positionally with [`Table::years`].
    pub values: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset, loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Ordered year column labels shared by every record.
    pub years: Vec<String>,
    /// All rows, in file order.
    pub records: Vec<Record>,
}

impl Table {
    /// Build a table over the hard-coded year columns.
    pub fn new(records: Vec<Record>) -> Self {
        Table {
            years: YEAR_LABELS.iter().map(|y| y.to_string()).collect(),
            records,
        }
    }

    /// First record whose region matches `region` exactly, if any.
    pub fn record(&self, region: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.region == region)
    }

    /// A region's value for a year label. `None` when either the region or
    /// the year is unknown; lookups never fail.
    pub fn value(&self, region: &str, year: &str) -> Option<&CellValue> {
        let idx = self.years.iter().position(|y| y == year)?;
        self.record(region)?.values.get(idx)
    }

    /// Region labels in file order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.region.as_str())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
