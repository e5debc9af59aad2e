//! Workout picker and the per-workout cards

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use swimdash_core::format::{workout_card, WorkoutCard};
use swimdash_core::{workout_options, WorkoutSummary};

use crate::server::AppState;

/// `?date=` as the workout picker sends it; absent or blank means no selection.
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutParams {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub summary: WorkoutSummary,
    pub card: WorkoutCard,
}

/// GET /api/workouts - picker entries, one per workout date
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(workout_options(state.dashboard.records()))
}

/// GET /api/workouts/summary - yardage and duration of one workout
async fn workout_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WorkoutParams>,
) -> Json<WorkoutResponse> {
    let summary = state.dashboard.workout(params.date.as_deref());
    let card = workout_card(&summary, state.units);
    Json(WorkoutResponse { summary, card })
}

/// Workout routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts))
        .route("/api/workouts/summary", get(workout_summary))
}
