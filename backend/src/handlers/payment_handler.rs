use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{JsonBody, PathParam};
use crate::models::PaymentStats;
use crate::services::{PaymentService, PaymentSubmission, PaymentView};

#[derive(Clone)]
pub struct PaymentState {
    pub payment_service: Arc<PaymentService>,
}

#[derive(Debug, Serialize)]
pub struct PaymentStatsResponse {
    #[serde(flatten)]
    pub stats: PaymentStats,
    pub approval_rate: Option<i64>,
}

pub fn payment_router(state: PaymentState) -> Router {
    Router::new()
        .route("/api/payments", post(submit_payment))
        .route("/api/payments/stats", get(get_stats))
        .route("/api/payments/:payment_id/approve", post(approve_payment))
        .route("/api/payments/:payment_id/reject", post(reject_payment))
        .with_state(state)
}

pub async fn submit_payment(
    State(state): State<PaymentState>,
    WithRejection(Json(body), _): JsonBody<PaymentSubmission>,
) -> Result<(StatusCode, Json<PaymentView>), AppError> {
    let payment = state.payment_service.submit_payment(body).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn approve_payment(
    State(state): State<PaymentState>,
    WithRejection(Path(payment_id), _): PathParam<Uuid>,
) -> Result<Json<PaymentView>, AppError> {
    Ok(Json(state.payment_service.approve(payment_id).await?))
}

pub async fn reject_payment(
    State(state): State<PaymentState>,
    WithRejection(Path(payment_id), _): PathParam<Uuid>,
) -> Result<Json<PaymentView>, AppError> {
    Ok(Json(state.payment_service.reject(payment_id).await?))
}

pub async fn get_stats(
    State(state): State<PaymentState>,
) -> Result<Json<PaymentStatsResponse>, AppError> {
    let stats = state.payment_service.stats().await?;
    let approval_rate = stats.approval_rate();
    Ok(Json(PaymentStatsResponse {
        stats,
        approval_rate,
    }))
}
