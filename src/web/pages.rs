//! Page compositor: every HTML document the server emits.
//!
//! The whole frontend is embedded in the binary as string constants: no
//! external assets, no build tools, no CDN dependencies. Pages share one
//! layout (sidebar + content); only the dashboard page carries widgets and
//! the selector script.

use crate::data::model::Table;
use crate::state::Selection;
use crate::view::{self, TableSpec};

// ---------------------------------------------------------------------------
// Sidebar navigation
// ---------------------------------------------------------------------------

/// Which sidebar entry the rendered page corresponds to. `None` is for the
/// 404 page, which belongs to no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Dashboard,
    RawTable,
    Map,
    None,
}

const NAV_ENTRIES: [(Nav, &str, &str); 4] = [
    (Nav::Home, "/", "Inicio"),
    (Nav::Dashboard, "/dashboard", "Dashboard"),
    (Nav::RawTable, "/table", "Tabla completa"),
    (Nav::Map, "/map", "Mapa"),
];

// ---------------------------------------------------------------------------
// Embedded assets
// ---------------------------------------------------------------------------

const STYLE: &str = r##"
:root {
  --bg: #f6f7f9;
  --surface: #ffffff;
  --border: #d9dde3;
  --text: #1f2937;
  --text-muted: #6b7280;
  --accent: #2563eb;
  --sidebar: #111827;
  --sidebar-text: #e5e7eb;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  font-size: 14px;
}
.shell { display: flex; min-height: 100vh; }
nav.sidebar {
  width: 200px;
  flex-shrink: 0;
  background: var(--sidebar);
  color: var(--sidebar-text);
  padding: 24px 0;
}
nav.sidebar a {
  display: block;
  padding: 10px 24px;
  color: var(--sidebar-text);
  text-decoration: none;
}
nav.sidebar a:hover { background: #1f2937; }
nav.sidebar a.active { background: var(--accent); color: #fff; }
main.content { flex: 1; padding: 32px; }
h1 { font-size: 22px; margin-bottom: 20px; }
form.selectors { overflow: auto; margin-bottom: 20px; }
.picker { float: left; margin-right: 24px; }
.picker label { display: block; color: var(--text-muted); margin-bottom: 6px; }
.picker select {
  min-width: 220px;
  border: 1px solid var(--border);
  border-radius: 4px;
  background: var(--surface);
  padding: 4px;
}
.chart { clear: both; margin-bottom: 20px; }
.table-wrap { width: 30%; float: left; overflow-x: auto; }
table.data { border-collapse: collapse; background: var(--surface); width: 100%; }
table.data th, table.data td {
  border: 1px solid var(--border);
  padding: 6px 10px;
  text-align: left;
  white-space: nowrap;
}
table.data th { background: #eef1f5; }
p.muted { color: var(--text-muted); }
code { background: #eef1f5; padding: 2px 5px; border-radius: 3px; }
"##;

/// Re-renders chart and table in place whenever a selector changes. The
/// request goes to `/dashboard/data`, which answers with the two fragments.
/// Without scripting the form still works as a plain GET submit.
const DASHBOARD_JS: &str = r##"
const form = document.getElementById('selection-form');
const selects = form.querySelectorAll('select');
async function update() {
  const params = new URLSearchParams();
  for (const sel of selects) {
    for (const opt of sel.selectedOptions) params.append(sel.name, opt.value);
  }
  const res = await fetch('/dashboard/data?' + params.toString());
  if (!res.ok) return;
  const body = await res.json();
  document.getElementById('line-chart').innerHTML = body.chart_svg;
  document.getElementById('data-table').innerHTML = body.table_html;
  history.replaceState(null, '', '/dashboard?' + params.toString());
}
selects.forEach((sel) => sel.addEventListener('change', update));
"##;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn layout(active: Nav, title: &str, body: &str) -> String {
    let links: Vec<String> = NAV_ENTRIES
        .iter()
        .map(|(nav, path, label)| {
            let class = if *nav == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{path}\"{class}>{label}</a>")
        })
        .collect();

    format!(
        "<!DOCTYPE html>\
         <html lang=\"es\">\
         <head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title>\
         <style>{STYLE}</style>\
         </head>\
         <body>\
         <div class=\"shell\">\
         <nav class=\"sidebar\">{links}</nav>\
         <main class=\"content\">{body}</main>\
         </div>\
         </body>\
         </html>",
        title = escape(title),
        links = links.join(""),
    )
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// `/` – deliberately empty landing page.
pub fn home_page() -> String {
    layout(Nav::Home, "Crime Dash", "")
}

/// `/dashboard` – selectors, chart and table. The fragments are rendered by
/// the caller from the same [`view::render`] output the data endpoint uses.
pub fn dashboard_page(
    table: &Table,
    selection: &Selection,
    chart_svg: &str,
    table_html: &str,
) -> String {
    let region_options: Vec<String> = table
        .regions()
        .map(|r| option(r, selection.regions.iter().any(|s| s == r)))
        .collect();
    let year_options: Vec<String> = table
        .years
        .iter()
        .map(|y| option(y, selection.years.iter().any(|s| s == y)))
        .collect();

    let body = format!(
        "<h1>SECURITY CRIME INCIDENCE</h1>\
         <form id=\"selection-form\" class=\"selectors\" method=\"get\" action=\"/dashboard\">\
         <div class=\"picker\">\
         <label for=\"regions\">Seleccione estado(s)</label>\
         <select id=\"regions\" name=\"regions\" multiple size=\"8\">{regions}</select>\
         </div>\
         <div class=\"picker\">\
         <label for=\"years\">Seleccione uno o más años</label>\
         <select id=\"years\" name=\"years\" multiple size=\"8\">{years}</select>\
         </div>\
         <noscript><button type=\"submit\">Aplicar</button></noscript>\
         </form>\
         <div id=\"line-chart\" class=\"chart\">{chart_svg}</div>\
         <div id=\"data-table\" class=\"table-wrap\">{table_html}</div>\
         <script>{DASHBOARD_JS}</script>",
        regions = region_options.join(""),
        years = year_options.join(""),
    );
    layout(Nav::Dashboard, "Dashboard – Crime Dash", &body)
}

fn option(value: &str, selected: bool) -> String {
    format!(
        "<option value=\"{v}\"{sel}>{v}</option>",
        v = escape(value),
        sel = if selected { " selected" } else { "" },
    )
}

/// `/table` – the full dataset, every region and every year column.
pub fn raw_table_page(table: &Table) -> String {
    let everything = Selection {
        regions: table.regions().map(str::to_string).collect(),
        years: Vec::new(),
    };
    let (_, spec) = view::render(table, &everything);
    let body = format!(
        "<h1>Tabla completa</h1><div class=\"table-wrap\" style=\"width: 100%\">{}</div>",
        table_fragment(&spec)
    );
    layout(Nav::RawTable, "Tabla – Crime Dash", &body)
}

/// `/map` – placeholder for the map view that never shipped.
pub fn map_page() -> String {
    let body = "<h1>Mapa de incidencia</h1><p class=\"muted\">Próximamente.</p>";
    layout(Nav::Map, "Mapa – Crime Dash", body)
}

/// Any other path – 404 echoing the path that was asked for.
pub fn not_found_page(path: &str) -> String {
    let body = format!(
        "<h1>404 – Página no encontrada</h1>\
         <p>La ruta <code>{}</code> no existe.</p>",
        escape(path)
    );
    layout(Nav::None, "404 – Crime Dash", &body)
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

/// A [`TableSpec`] as an HTML table. An empty spec (nothing selected) is an
/// empty table, mirroring the empty chart next to it.
pub fn table_fragment(spec: &TableSpec) -> String {
    if spec.columns.is_empty() {
        return "<table class=\"data\"></table>".to_string();
    }

    let mut html = String::from("<table class=\"data\"><thead><tr>");
    for col in &spec.columns {
        html.push_str(&format!("<th>{}</th>", escape(col)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &spec.rows {
        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", escape(&row.region)));
        for cell in &row.cells {
            match cell {
                Some(value) => {
                    html.push_str(&format!("<td>{}</td>", escape(&value.to_string())))
                }
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Minimal HTML escaping for text nodes and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use crate::view::TableRow;

    fn sample_table() -> Table {
        Table {
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
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn empty_table_spec_is_an_empty_table() {
        assert_eq!(table_fragment(&TableSpec::default()), "<table class=\"data\"></table>");
    }

    #[test]
    fn table_fragment_renders_missing_cells_blank() {
        let spec = TableSpec {
            columns: vec!["State".into(), "2012".into(), "1999".into()],
            rows: vec![TableRow {
                region: "North".into(),
                cells: vec![Some(CellValue::Int(7)), None],
            }],
        };
        let html = table_fragment(&spec);
        assert!(html.contains("<th>State</th><th>2012</th><th>1999</th>"));
        assert!(html.contains("<td>North</td><td>7</td><td></td>"));
    }

    #[test]
    fn dashboard_marks_current_selection() {
        let table = sample_table();
        let selection = Selection {
            regions: vec!["South".into()],
            years: vec!["2012".into()],
        };
        let html = dashboard_page(&table, &selection, "<svg></svg>", "<table></table>");
        assert!(html.contains("<option value=\"South\" selected>South</option>"));
        assert!(html.contains("<option value=\"North\">North</option>"));
        assert!(html.contains("<option value=\"2012\" selected>2012</option>"));
        assert!(html.contains("SECURITY CRIME INCIDENCE"));
    }

    #[test]
    fn raw_table_page_dumps_every_region_and_year() {
        let html = raw_table_page(&sample_table());
        for needle in ["North", "South", "2011", "2012"] {
            assert!(html.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn not_found_echoes_the_escaped_path() {
        let html = not_found_page("/unknown-path");
        assert!(html.contains("/unknown-path"));

        let hostile = not_found_page("/<script>");
        assert!(hostile.contains("/&lt;script&gt;"));
        // The 404 page embeds no scripts, so a raw tag would be an injection.
        assert!(!hostile.contains("<script>"));
    }

    #[test]
    fn sidebar_highlights_the_active_page() {
        let html = map_page();
        assert!(html.contains("<a href=\"/map\" class=\"active\">Mapa</a>"));
        assert!(html.contains("<a href=\"/dashboard\">Dashboard</a>"));
    }
}
