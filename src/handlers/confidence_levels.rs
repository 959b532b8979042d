use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    app::AppState,
    db::DbPool,
    data::models::{ApiError, ConfidenceLevel, ConfidenceLevelForm},
    data::repositories::ConfidenceLevelRepository,
    utils::{CurrentUser, ValidatedJson},
};

pub async fn list_confidence_levels(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<ConfidenceLevel>>, ApiError> {
    let mut conn = pool.get()?;
    Ok(Json(ConfidenceLevelRepository::list_for_user(&mut conn, user_id)?))
}

pub async fn get_confidence_level(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(level_id): Path<i32>,
) -> Result<Json<ConfidenceLevel>, ApiError> {
    let mut conn = pool.get()?;
    ConfidenceLevelRepository::find_for_user(&mut conn, level_id, user_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Confidence level"))
}

pub async fn create_confidence_level(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    ValidatedJson(form): ValidatedJson<ConfidenceLevelForm>,
) -> Result<(StatusCode, Json<ConfidenceLevel>), ApiError> {
    let mut conn = pool.get()?;
    let level = ConfidenceLevelRepository::create(&mut conn, user_id, &form)?;

    log::info!(
        "Confidence level {} ({} days) created for user {}",
        level.id,
        level.interval_days,
        user_id
    );
    Ok((StatusCode::CREATED, Json(level)))
}

pub async fn update_confidence_level(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(level_id): Path<i32>,
    ValidatedJson(form): ValidatedJson<ConfidenceLevelForm>,
) -> Result<Json<ConfidenceLevel>, ApiError> {
    let mut conn = pool.get()?;
    ConfidenceLevelRepository::update(&mut conn, level_id, user_id, &form)?
        .map(Json)
        .ok_or(ApiError::NotFound("Confidence level"))
}

pub async fn delete_confidence_level(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(level_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    if ConfidenceLevelRepository::find_for_user(&mut conn, level_id, user_id)?.is_none() {
        return Err(ApiError::NotFound("Confidence level"));
    }
    if ConfidenceLevelRepository::is_in_use(&mut conn, level_id)? {
        return Err(ApiError::Conflict(
            "Confidence level is still assigned to cards".to_string(),
        ));
    }

    ConfidenceLevelRepository::delete(&mut conn, level_id, user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn confidence_levels_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/confidence-levels",
            get(list_confidence_levels).post(create_confidence_level),
        )
        .route(
            "/confidence-levels/{level_id}",
            get(get_confidence_level)
                .put(update_confidence_level)
                .delete(delete_confidence_level),
        )
        .with_state(state)
}
