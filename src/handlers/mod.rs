use axum::Json;

use crate::data::models::HealthResponse;

pub mod auth;
pub mod cards;
pub mod confidence_levels;
pub mod review_schedules;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
