//! HTTP layer: the router over the four pages plus the data endpoint.
//!
//! Pathname → page is the whole state machine; nothing else drives
//! navigation. Every dashboard rendering funnels through [`view::render`],
//! whether it arrives as a full page request or as a selector-change fetch
//! from the embedded script.

pub mod chart;
pub mod pages;

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use serde::Serialize;

use crate::data::model::Table;
use crate::state::Selection;
use crate::view;

/// The dataset, loaded once and shared read-only across requests.
pub type SharedTable = Arc<Table>;

/// Answer to a selector change: the two fragments the script swaps in.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub chart_svg: String,
    pub table_html: String,
}

/// Build the application router.
pub fn router(table: SharedTable) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/data", get(dashboard_data))
        .route("/table", get(raw_table))
        .route("/map", get(map))
        .fallback(not_found)
        .with_state(table)
}

async fn home() -> Html<String> {
    Html(pages::home_page())
}

async fn dashboard(
    State(table): State<SharedTable>,
    RawQuery(query): RawQuery,
) -> Html<String> {
    let selection = Selection::from_query(query.as_deref());
    debug!(
        "dashboard: {} region(s), {} year(s) selected",
        selection.regions.len(),
        selection.years.len()
    );
    let (chart_spec, table_spec) = view::render(&table, &selection);
    let chart_svg = chart::chart_svg(&chart_spec);
    let table_html = pages::table_fragment(&table_spec);
    Html(pages::dashboard_page(
        &table, &selection, &chart_svg, &table_html,
    ))
}

async fn dashboard_data(
    State(table): State<SharedTable>,
    RawQuery(query): RawQuery,
) -> Json<RenderResponse> {
    let selection = Selection::from_query(query.as_deref());
    let (chart_spec, table_spec) = view::render(&table, &selection);
    Json(RenderResponse {
        chart_svg: chart::chart_svg(&chart_spec),
        table_html: pages::table_fragment(&table_spec),
    })
}

async fn raw_table(State(table): State<SharedTable>) -> Html<String> {
    Html(pages::raw_table_page(&table))
}

async fn map() -> Html<String> {
    Html(pages::map_page())
}

async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    debug!("404: {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found_page(uri.path())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn shared_table() -> SharedTable {
        Arc::new(Table {
            years: vec!["2011".into(), "2012".into()],
            records: vec![
                Record {
                    region: "North".into(),
                    values: vec![CellValue::Int(5), CellValue::Int(7)],
                },
                Record {
                    region: "South".into(),
                    values: vec![CellValue::Int(3), CellValue::Int(4)],
                },
            ],
        })
    }

    #[tokio::test]
    async fn unknown_path_is_a_404_echoing_the_path() {
        let (status, Html(body)) = not_found(Uri::from_static("/unknown-path")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("/unknown-path"));
    }

    #[tokio::test]
    async fn dashboard_without_selection_is_empty() {
        let Html(body) = dashboard(State(shared_table()), RawQuery(None)).await;
        assert!(!body.contains("<polyline"));
        // Selectors are still offered.
        assert!(body.contains("<option value=\"North\">North</option>"));
        assert!(body.contains("<table class=\"data\"></table>"));
    }

    #[tokio::test]
    async fn dashboard_renders_the_selection() {
        let query = Some("regions=North&years=2012".to_string());
        let Html(body) = dashboard(State(shared_table()), RawQuery(query)).await;
        assert!(body.contains("<polyline"));
        assert!(body.contains("<option value=\"North\" selected>North</option>"));
        assert!(body.contains("<th>State</th><th>2012</th>"));
        assert!(body.contains("<td>North</td><td>7</td>"));
    }

    #[tokio::test]
    async fn data_endpoint_returns_both_fragments() {
        let query = Some("regions=North&regions=South".to_string());
        let Json(response) = dashboard_data(State(shared_table()), RawQuery(query)).await;
        assert!(response.chart_svg.starts_with("<svg"));
        assert_eq!(response.chart_svg.matches("<polyline").count(), 2);
        assert!(response.table_html.contains("<td>South</td>"));
    }

    #[tokio::test]
    async fn raw_table_lists_everything() {
        let Html(body) = raw_table(State(shared_table())).await;
        for needle in ["North", "South", "2011", "2012"] {
            assert!(body.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn router_builds() {
        let _ = router(shared_table());
    }
}
