//! Yardage-over-time chart

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use swimdash_core::{yardage_series, YardagePoint};

use crate::server::AppState;

/// GET /api/series/yardage
async fn yardage(State(state): State<Arc<AppState>>) -> Json<Vec<YardagePoint>> {
    Json(yardage_series(state.dashboard.records()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/series/yardage", get(yardage))
}
