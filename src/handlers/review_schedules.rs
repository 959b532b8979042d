use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;

use crate::{
    app::AppState,
    db::DbPool,
    data::models::{
        ApiError, CreateReviewScheduleRequest, NewReviewSchedule, ReviewSchedule, ReviewScheduleChanges,
        SessionParams,
    },
    data::repositories::{CardRepository, ReviewScheduleRepository},
    features::srs::ReviewScheduler,
    utils::{CurrentUser, ValidatedJson},
};

pub async fn list_review_schedules(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<ReviewSchedule>>, ApiError> {
    let mut conn = pool.get()?;
    Ok(Json(ReviewScheduleRepository::list_for_user(&mut conn, user_id)?))
}

/// Schedules due at `?at=` (default now).
pub async fn review_session(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<SessionParams>,
) -> Result<Json<Vec<ReviewSchedule>>, ApiError> {
    let mut conn = pool.get()?;
    let due = ReviewScheduler::new(&mut conn).due(user_id, params.at)?;
    Ok(Json(due))
}

pub async fn complete_review_session(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<SessionParams>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;
    ReviewScheduler::new(&mut conn)
        .complete_session(user_id, params.at)
        .map_err(|e| {
            log::error!("Review session for user {} rolled back: {}", user_id, e);
            ApiError::Database(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_review_schedule(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateReviewScheduleRequest>,
) -> Result<(StatusCode, Json<ReviewSchedule>), ApiError> {
    let mut conn = pool.get()?;

    let card = CardRepository::find_for_user(&mut conn, payload.card_id, user_id)?
        .ok_or(ApiError::NotFound("Card"))?;

    let schedule = ReviewScheduleRepository::create(
        &mut conn,
        &NewReviewSchedule {
            review_date: payload.review_date.unwrap_or_else(|| Utc::now().naive_utc()),
            card_id: card.id,
            user_id,
        },
    )?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn get_review_schedule(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(schedule_id): Path<i32>,
) -> Result<Json<ReviewSchedule>, ApiError> {
    let mut conn = pool.get()?;
    ReviewScheduleRepository::find_for_user(&mut conn, schedule_id, user_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Review schedule"))
}

pub async fn update_review_schedule(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(schedule_id): Path<i32>,
    ValidatedJson(changes): ValidatedJson<ReviewScheduleChanges>,
) -> Result<Json<ReviewSchedule>, ApiError> {
    let mut conn = pool.get()?;
    ReviewScheduleRepository::update(&mut conn, schedule_id, user_id, &changes)?
        .map(Json)
        .ok_or(ApiError::NotFound("Review schedule"))
}

pub async fn delete_review_schedule(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(schedule_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    if ReviewScheduleRepository::delete(&mut conn, schedule_id, user_id)? == 0 {
        return Err(ApiError::NotFound("Review schedule"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn review_schedules_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/review-schedules",
            get(list_review_schedules).post(create_review_schedule),
        )
        .route("/review-schedules/session", get(review_session))
        .route("/review-schedules/complete", post(complete_review_session))
        .route(
            "/review-schedules/{schedule_id}",
            get(get_review_schedule)
                .put(update_review_schedule)
                .delete(delete_review_schedule),
        )
        .with_state(state)
}
