//! HTML report pages.

use axum::{
    extract::{Query, State},
    http::Uri,
    response::Html,
};
use irisboard::analysis::SPECIES;
use irisboard::report::pairplot;
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Rows shown on the smallest sepal width page unless `?n=` says otherwise.
const DEFAULT_TOP_N: usize = 5;

type PageResult = Result<Html<String>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<usize>,
}

pub async fn index(State(state): State<AppState>) -> PageResult {
    Ok(Html(state.renderer.index()?))
}

pub async fn dataset(State(state): State<AppState>) -> PageResult {
    Ok(Html(state.renderer.dataset(&state.table)?))
}

pub async fn summary(State(state): State<AppState>) -> PageResult {
    Ok(Html(state.renderer.summary(&state.table)?))
}

pub async fn species_summary(State(state): State<AppState>) -> PageResult {
    Ok(Html(state.renderer.species_summary(&state.table)?))
}

/// Scatterplot matrix coloured by species; drawn off the async workers.
pub async fn feature_pairplot(State(state): State<AppState>) -> PageResult {
    let page = tokio::task::spawn_blocking(move || {
        let plot = pairplot::render(&state.table, SPECIES)?;
        state.renderer.pairplot(&plot)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("pairplot task failed: {}", e)))??;

    Ok(Html(page))
}

pub async fn min_sepal_widths(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> PageResult {
    let n = query.n.unwrap_or(DEFAULT_TOP_N);
    Ok(Html(state.renderer.smallest_sepal_widths(&state.table, n)?))
}

pub async fn largest_petal_area(State(state): State<AppState>) -> PageResult {
    Ok(Html(state.renderer.largest_petal_area(&state.table)?))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
