//! Year picker and the period totals panel

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use swimdash_core::format::{totals_card, TotalsCard};
use swimdash_core::{year_options, PeriodSummary, YearOption};

use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TotalsParams {
    pub year: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub summary: PeriodSummary,
    pub card: TotalsCard,
}

/// GET /api/years - "All Years" followed by each workout year
async fn list_years(State(state): State<Arc<AppState>>) -> Json<Vec<YearOption>> {
    Json(year_options(state.dashboard.records()))
}

/// GET /api/totals - count, totals and averages for a year or all years
async fn totals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TotalsParams>,
) -> Result<Json<TotalsResponse>, ApiError> {
    let summary = state.dashboard.totals(params.year.as_deref())?;
    let card = totals_card(&summary, state.units);
    Ok(Json(TotalsResponse { summary, card }))
}

/// Totals routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/years", get(list_years))
        .route("/api/totals", get(totals))
}
