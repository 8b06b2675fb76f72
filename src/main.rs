mod color;
mod data;
mod state;
mod view;
mod web;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;

/// Candidate dataset paths, probed in order. The dataset the dashboard was
/// built around ships as `NewData.xlsx`; the csv/json forms exist because
/// the loader is multi-format and `generate_sample` writes csv.
const DATA_PATHS: [&str; 3] = ["NewData.xlsx", "NewData.csv", "NewData.json"];

const LISTEN_ADDR: &str = "127.0.0.1:8050";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = DATA_PATHS.iter().map(Path::new).find(|p| p.exists()) else {
        bail!(
            "no dataset found; expected one of {DATA_PATHS:?} in the working directory \
             (run `cargo run --bin generate_sample` to create one)"
        );
    };

    let table = data::loader::load(path)
        .with_context(|| format!("loading dataset from {}", path.display()))?;
    info!(
        "loaded {} regions × {} year columns from {}",
        table.len(),
        table.years.len(),
        path.display()
    );

    let app = web::router(Arc::new(table));
    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR)
        .await
        .with_context(|| format!("binding {LISTEN_ADDR}"))?;
    info!("dashboard listening on http://{LISTEN_ADDR}");
    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
