use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::QueryParams;
use crate::services::{Overview, OverviewService};

#[derive(Clone)]
pub struct OverviewState {
    pub overview_service: Arc<OverviewService>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    pub days: Option<i64>,
}

pub fn overview_router(state: OverviewState) -> Router {
    Router::new()
        .route("/api/overview", get(get_overview))
        .with_state(state)
}

pub async fn get_overview(
    State(state): State<OverviewState>,
    WithRejection(Query(query), _): QueryParams<OverviewQuery>,
) -> Result<Json<Overview>, AppError> {
    Ok(Json(state.overview_service.overview(query.days).await?))
}
