//! Route handlers organized by dashboard panel

pub mod health;
pub mod records;
pub mod series;
pub mod strokes;
pub mod totals;
pub mod workouts;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use swimdash_core::{load_aggregates, load_records, Dashboard, DistanceUnit};
    use tower::ServiceExt;

    use crate::server::{build_router, AppState};

    const RECORDS: &str = "\
date,total_distance,total_elapsed_time,total_time_minutes,max_heart_rate,num_lengths,swim_stroke
2023-11-04,1800,2400,40,151,72,freestyle
2024-01-01,2000,3600,55,160,80,mixed
2024-01-03,,1200,20,,,
";

    const AGGREGATES: &str = "\
date,swim_stroke,total_distance
11/04/2023,freestyle,1800
01/01/2024,freestyle,1500
01/01/2024,kick,500
01/03/2024,drill,0
";

    pub fn app() -> Router {
        let dashboard = Dashboard::from_parts(
            load_records(RECORDS.as_bytes()).unwrap(),
            load_aggregates(AGGREGATES.as_bytes()).unwrap(),
        );
        build_router(AppState::new(dashboard, DistanceUnit::Yards))
    }

    pub async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
