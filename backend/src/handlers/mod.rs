//! HTTP surface. Each area owns a state struct and a router.

mod group_handler;
mod health_handler;
mod membership_handler;
mod overview_handler;
mod payment_handler;
mod profile_handler;

pub use group_handler::*;
pub use health_handler::*;
pub use membership_handler::*;
pub use overview_handler::*;
pub use payment_handler::*;
pub use profile_handler::*;

use crate::error::AppError;
use crate::AppState;
use axum::extract::{Path, Query};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// JSON body whose rejection is reported as an [`AppError`]
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Path parameters whose rejection is reported as an [`AppError`]
pub type PathParam<T> = WithRejection<Path<T>, AppError>;

pub type QueryParams<T> = WithRejection<Query<T>, AppError>;

/// Assemble every area router over shared application state
pub fn create_router(state: &AppState) -> Router {
    Router::new()
        .merge(health_router(HealthState {
            database: state.database.clone(),
        }))
        .merge(group_router(GroupState {
            group_service: state.group_service.clone(),
            membership_service: state.membership_service.clone(),
            payment_service: state.payment_service.clone(),
        }))
        .merge(membership_router(MembershipState {
            membership_service: state.membership_service.clone(),
        }))
        .merge(profile_router(ProfileState {
            profile_service: state.profile_service.clone(),
            membership_service: state.membership_service.clone(),
            payment_service: state.payment_service.clone(),
        }))
        .merge(payment_router(PaymentState {
            payment_service: state.payment_service.clone(),
        }))
        .merge(overview_router(OverviewState {
            overview_service: state.overview_service.clone(),
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
