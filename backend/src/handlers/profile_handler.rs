use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{JsonBody, PathParam};
use crate::models::{Account, AccountStatus, Membership, NewProfile, Profile};
use crate::services::{
    AccountUpdate, MembershipService, NewAccount, PaymentService, PaymentView, ProfileService,
};

#[derive(Clone)]
pub struct ProfileState {
    pub profile_service: Arc<ProfileService>,
    pub membership_service: Arc<MembershipService>,
    pub payment_service: Arc<PaymentService>,
}

#[derive(Debug, Deserialize)]
pub struct AccountStatusRequest {
    pub status: AccountStatus,
}

pub fn profile_router(state: ProfileState) -> Router {
    Router::new()
        .route("/api/profiles", get(list_profiles).post(create_profile))
        .route("/api/profiles/:user_id", get(get_profile))
        .route("/api/profiles/:user_id/memberships", get(get_memberships))
        .route("/api/profiles/:user_id/payments", get(get_payments))
        .route(
            "/api/profiles/:user_id/accounts",
            get(get_accounts).post(create_account),
        )
        .route("/api/accounts/:account_id", put(update_account))
        .route("/api/accounts/:account_id/status", put(update_account_status))
        .with_state(state)
}

pub async fn list_profiles(
    State(state): State<ProfileState>,
) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(state.profile_service.list_profiles().await?))
}

pub async fn create_profile(
    State(state): State<ProfileState>,
    WithRejection(Json(body), _): JsonBody<NewProfile>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let profile = state.profile_service.create_profile(body).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_profile(
    State(state): State<ProfileState>,
    WithRejection(Path(user_id), _): PathParam<Uuid>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profile_service.get_profile(user_id).await?))
}

pub async fn get_memberships(
    State(state): State<ProfileState>,
    WithRejection(Path(user_id), _): PathParam<Uuid>,
) -> Result<Json<Vec<Membership>>, AppError> {
    state.profile_service.get_profile(user_id).await?;
    Ok(Json(state.membership_service.memberships_of(user_id).await?))
}

pub async fn get_payments(
    State(state): State<ProfileState>,
    WithRejection(Path(user_id), _): PathParam<Uuid>,
) -> Result<Json<Vec<PaymentView>>, AppError> {
    state.profile_service.get_profile(user_id).await?;
    Ok(Json(state.payment_service.payments_of_user(user_id).await?))
}

pub async fn create_account(
    State(state): State<ProfileState>,
    WithRejection(Path(user_id), _): PathParam<Uuid>,
    WithRejection(Json(body), _): JsonBody<NewAccount>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = state.profile_service.create_account(user_id, body).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn get_accounts(
    State(state): State<ProfileState>,
    WithRejection(Path(user_id), _): PathParam<Uuid>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(state.profile_service.accounts_of(user_id).await?))
}

pub async fn update_account(
    State(state): State<ProfileState>,
    WithRejection(Path(account_id), _): PathParam<Uuid>,
    WithRejection(Json(body), _): JsonBody<AccountUpdate>,
) -> Result<Json<Account>, AppError> {
    Ok(Json(state.profile_service.update_account(account_id, body).await?))
}

pub async fn update_account_status(
    State(state): State<ProfileState>,
    WithRejection(Path(account_id), _): PathParam<Uuid>,
    WithRejection(Json(body), _): JsonBody<AccountStatusRequest>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .profile_service
        .update_account_status(account_id, body.status)
        .await?;
    Ok(Json(account))
}
