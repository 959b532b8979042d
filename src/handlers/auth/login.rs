use axum::{Json, extract::State, http::StatusCode};
use tower_sessions::Session;

use crate::{
    db::DbPool,
    data::models::{LoginError, LoginForm, LoginResponse},
    data::repositories::UserRepository,
    features::auth::verify_password,
    utils::{ValidatedJson, set_user_session},
};

#[axum::debug_handler]
pub async fn handle_login(
    State(pool): State<DbPool>,
    session: Session,
    ValidatedJson(form): ValidatedJson<LoginForm>,
) -> Result<Json<LoginResponse>, LoginError> {
    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        LoginError::from(e)
    })?;

    let user = UserRepository::find_by_username(&mut conn, &form.username).map_err(|e| {
        log::error!("Database error during login: {}", e);
        LoginError::DatabaseError(e)
    })?;

    match user {
        Some(user) => {
            if verify_password(&form.password, &user.password_hash)? {
                set_user_session(&session, user.id, &user.username).await?;
                log::info!("User logged in: {}", user.username);
                Ok(Json(LoginResponse {
                    message: "Login successful".to_string(),
                    user_id: user.id,
                }))
            } else {
                log::warn!("Invalid password for user: {}", form.username);
                Err(LoginError::InvalidCredentials)
            }
        }
        None => {
            log::warn!("User not found: {}", form.username);
            Err(LoginError::InvalidCredentials)
        }
    }
}

pub async fn handle_logout(session: Session) -> Result<StatusCode, LoginError> {
    session.flush().await.map_err(|e| {
        log::error!("Failed to delete session: {}", e);
        LoginError::from(e)
    })?;
    Ok(StatusCode::NO_CONTENT)
}
