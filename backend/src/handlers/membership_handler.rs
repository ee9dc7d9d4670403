use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::put;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{JsonBody, PathParam};
use crate::models::Membership;
use crate::services::MembershipService;

#[derive(Clone)]
pub struct MembershipState {
    pub membership_service: Arc<MembershipService>,
}

#[derive(Debug, Deserialize)]
pub struct VerificationRequest {
    pub payment_verified: bool,
}

pub fn membership_router(state: MembershipState) -> Router {
    Router::new()
        .route(
            "/api/memberships/:membership_id/verification",
            put(set_verification),
        )
        .with_state(state)
}

pub async fn set_verification(
    State(state): State<MembershipState>,
    WithRejection(Path(membership_id), _): PathParam<Uuid>,
    WithRejection(Json(body), _): JsonBody<VerificationRequest>,
) -> Result<Json<Membership>, AppError> {
    let membership = state
        .membership_service
        .set_payment_verified(membership_id, body.payment_verified)
        .await?;
    Ok(Json(membership))
}
