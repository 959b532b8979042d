use axum::{Json, extract::State, http::StatusCode};
use tower_sessions::Session;

use crate::{
    db::DbPool,
    data::models::{ApiError, User},
    data::repositories::UserRepository,
    utils::CurrentUser,
};

pub async fn current_account(
    State(pool): State<DbPool>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<User>, ApiError> {
    let mut conn = pool.get()?;

    // A session can outlive its account
    UserRepository::find_by_id(&mut conn, user_id)?
        .map(Json)
        .ok_or(ApiError::Unauthorized)
}

pub async fn delete_account(
    State(pool): State<DbPool>,
    session: Session,
    CurrentUser(user_id): CurrentUser,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    if UserRepository::delete(&mut conn, user_id)? == 0 {
        return Err(ApiError::Unauthorized);
    }
    session.flush().await?;

    log::info!("Deleted user {} and all owned data", user_id);
    Ok(StatusCode::NO_CONTENT)
}
