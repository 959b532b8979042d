use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;

use crate::{
    app::AppState,
    db::DbPool,
    data::models::{ApiError, Card, CreateCardRequest, NewCard, UpdateCardRequest},
    data::repositories::{CardRepository, ConfidenceLevelRepository},
    utils::{CurrentUser, ValidatedJson},
};

pub async fn list_cards(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Card>>, ApiError> {
    let mut conn = pool.get()?;
    Ok(Json(CardRepository::list_for_user(&mut conn, user_id)?))
}

pub async fn get_card(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(card_id): Path<i32>,
) -> Result<Json<Card>, ApiError> {
    let mut conn = pool.get()?;
    CardRepository::find_for_user(&mut conn, card_id, user_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Card"))
}

pub async fn create_card(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let mut conn = pool.get()?;

    let level = match payload.confidence_level_id {
        Some(level_id) => ConfidenceLevelRepository::find_for_user(&mut conn, level_id, user_id)?
            .ok_or(ApiError::NotFound("Confidence level"))?,
        None => ConfidenceLevelRepository::default_for_user(&mut conn, user_id)?.ok_or_else(|| {
            ApiError::Validation("No default confidence level; set confidence_level_id".to_string())
        })?,
    };

    let now = Utc::now().naive_utc();
    let card = CardRepository::create(
        &mut conn,
        &NewCard {
            term: payload.term.trim(),
            definition: payload.definition.trim(),
            example: payload.example.as_deref(),
            image_url: payload.image_url.as_deref(),
            audio_url: payload.audio_url.as_deref(),
            user_id,
            confidence_level_id: level.id,
            created_at: now,
            updated_at: now,
        },
    )?;

    log::info!("Card {} created for user {} at level {}", card.id, user_id, level.id);
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_card(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(card_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCardRequest>,
) -> Result<Json<Card>, ApiError> {
    let mut conn = pool.get()?;

    if let Some(level_id) = payload.confidence_level_id {
        if ConfidenceLevelRepository::find_for_user(&mut conn, level_id, user_id)?.is_none() {
            return Err(ApiError::NotFound("Confidence level"));
        }
    }

    let changes = payload.changes(Utc::now().naive_utc());
    CardRepository::update(&mut conn, card_id, user_id, &changes)?
        .map(Json)
        .ok_or(ApiError::NotFound("Card"))
}

pub async fn delete_card(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
    Path(card_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    if CardRepository::delete(&mut conn, card_id, user_id)? == 0 {
        return Err(ApiError::NotFound("Card"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn cards_router(state: AppState) -> Router {
    Router::new()
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/{card_id}", get(get_card).put(update_card).delete(delete_card))
        .with_state(state)
}
