//! Stroke breakdown chart

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use swimdash_core::format::breakdown_title;
use swimdash_core::{Scope, StrokeShare};

use crate::routes::workouts::WorkoutParams;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct StrokesResponse {
    pub title: String,
    pub scope: Scope,
    pub shares: Vec<StrokeShare>,
}

/// GET /api/strokes - distance per stroke for one workout, or all of them
async fn strokes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WorkoutParams>,
) -> Json<StrokesResponse> {
    let (scope, shares) = state.dashboard.strokes(params.date.as_deref());
    Json(StrokesResponse {
        title: breakdown_title(&scope),
        scope,
        shares,
    })
}

/// Stroke routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/strokes", get(strokes))
}
