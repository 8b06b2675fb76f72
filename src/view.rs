use serde::Serialize;

use crate::data::model::{CellValue, Table, REGION_LABEL};
use crate::state::Selection;

/// Chart title, shown only when at least one region is selected.
pub const CHART_TITLE: &str = "Datos por Estado";

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// One line on the chart: a region's values across every year column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    /// X labels. Always the table's full year range, whatever the year
    /// selection says; the chart keeps the complete context while the
    /// table narrows to the selected years.
    pub x: Vec<String>,
    /// Y values in column order, untouched. Same length as `x`.
    pub y: Vec<CellValue>,
}

/// The line chart as data: zero or more series over a shared x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub series: Vec<Series>,
}

/// One table row: the region label plus one cell per year column of the
/// table spec. `None` marks a cell with no backing data (unknown region or
/// unknown year), rendered as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub region: String,
    pub cells: Vec<Option<CellValue>>,
}

/// The data table as data: column labels and rows.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

// ---------------------------------------------------------------------------
// The filter & render engine
// ---------------------------------------------------------------------------

/// Derive the chart and table view models for a selection.
///
/// Pure and synchronous: same table and selection in, same specs out. The
/// web layer calls this on every dashboard request and on every selector
/// change; there is no other update path.
///
/// Policy for the empty selection: no regions picked means an empty chart
/// (no series) and an empty table (no columns, no rows), not an error.
/// Unknown regions contribute no chart series but do get a table row with
/// every cell blank.
pub fn render(table: &Table, selection: &Selection) -> (ChartSpec, TableSpec) {
    if selection.regions.is_empty() {
        return (ChartSpec::default(), TableSpec::default());
    }

    let series = selection
        .regions
        .iter()
        .filter_map(|region| {
            let record = table.record(region)?;
            Some(Series {
                name: region.clone(),
                x: table.years.clone(),
                y: record.values.clone(),
            })
        })
        .collect();
    let chart = ChartSpec {
        title: Some(CHART_TITLE.to_string()),
        series,
    };

    let effective_years = selection.effective_years(table);

    let mut columns = Vec::with_capacity(1 + effective_years.len());
    columns.push(REGION_LABEL.to_string());
    columns.extend(effective_years.iter().cloned());

    let rows = selection
        .regions
        .iter()
        .map(|region| TableRow {
            region: region.clone(),
            cells: effective_years
                .iter()
                .map(|year| table.value(region, year).cloned())
                .collect(),
        })
        .collect();

    (chart, TableSpec { columns, rows })
}
