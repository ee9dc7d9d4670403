use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{JsonBody, PathParam};
use crate::models::{Group, Membership, NewGroup};
use crate::services::{
    GroupSeating, GroupService, MemberPayments, MembershipService, PaymentService,
};

#[derive(Clone)]
pub struct GroupState {
    pub group_service: Arc<GroupService>,
    pub membership_service: Arc<MembershipService>,
    pub payment_service: Arc<PaymentService>,
}

/// Body of a join request; without `slot_number` the smallest free slot is taken
#[derive(Debug, Clone, Deserialize)]
pub struct JoinGroupRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub slot_number: Option<i32>,
}

pub fn group_router(state: GroupState) -> Router {
    Router::new()
        .route("/api/groups", get(list_groups).post(create_group))
        .route("/api/groups/:group_id", get(get_group))
        .route("/api/groups/:group_id/seating", get(get_seating))
        .route(
            "/api/groups/:group_id/members",
            get(get_members).post(join_group),
        )
        .route("/api/groups/:group_id/payments", get(get_group_payments))
        .with_state(state)
}

pub async fn list_groups(State(state): State<GroupState>) -> Result<Json<Vec<Group>>, AppError> {
    Ok(Json(state.group_service.list_groups().await?))
}

pub async fn create_group(
    State(state): State<GroupState>,
    WithRejection(Json(body), _): JsonBody<NewGroup>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let group = state.group_service.create_group(body).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn get_group(
    State(state): State<GroupState>,
    WithRejection(Path(group_id), _): PathParam<Uuid>,
) -> Result<Json<Group>, AppError> {
    Ok(Json(state.group_service.get_group(group_id).await?))
}

pub async fn get_seating(
    State(state): State<GroupState>,
    WithRejection(Path(group_id), _): PathParam<Uuid>,
) -> Result<Json<GroupSeating>, AppError> {
    Ok(Json(state.membership_service.seating(group_id).await?))
}

pub async fn get_members(
    State(state): State<GroupState>,
    WithRejection(Path(group_id), _): PathParam<Uuid>,
) -> Result<Json<Vec<Membership>>, AppError> {
    Ok(Json(state.membership_service.members_of(group_id).await?))
}

pub async fn join_group(
    State(state): State<GroupState>,
    WithRejection(Path(group_id), _): PathParam<Uuid>,
    WithRejection(Json(body), _): JsonBody<JoinGroupRequest>,
) -> Result<(StatusCode, Json<Membership>), AppError> {
    let membership = state
        .membership_service
        .join_group(group_id, body.user_id, body.slot_number)
        .await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

pub async fn get_group_payments(
    State(state): State<GroupState>,
    WithRejection(Path(group_id), _): PathParam<Uuid>,
) -> Result<Json<Vec<MemberPayments>>, AppError> {
    state.group_service.get_group(group_id).await?;
    Ok(Json(state.payment_service.group_payments(group_id).await?))
}
