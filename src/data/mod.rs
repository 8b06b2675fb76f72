/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  NewData.xlsx / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (fatal on any defect)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   Table   │  Vec<Record>, fixed 2011–2023 year columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  (table, selection) → ChartSpec + TableSpec
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
