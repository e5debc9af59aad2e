//! Paged, sortable records table

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use swimdash_core::catalog::DEFAULT_PAGE_SIZE;
use swimdash_core::{records_page, RecordColumn, RecordPage, TableRequest};

use crate::error::ApiError;
use crate::server::AppState;

/// Query string of the records table. `page` is zero-based.
#[derive(Debug, Default, Deserialize)]
pub struct RecordsParams {
    pub sort: Option<String>,
    #[serde(default)]
    pub desc: bool,
    #[serde(default)]
    pub page: usize,
    pub page_size: Option<usize>,
}

impl TryFrom<RecordsParams> for TableRequest {
    type Error = ApiError;

    fn try_from(params: RecordsParams) -> Result<Self, Self::Error> {
        let sort = params
            .sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<RecordColumn>)
            .transpose()
            .map_err(ApiError::bad_request)?;

        Ok(Self {
            sort,
            descending: params.desc,
            page: params.page,
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

/// GET /api/records
async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordsParams>,
) -> Result<Json<RecordPage>, ApiError> {
    let request = TableRequest::try_from(params)?;
    Ok(Json(records_page(state.dashboard.records(), &request)))
}

/// Records routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/records", get(list_records))
}
