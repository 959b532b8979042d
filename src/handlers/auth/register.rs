use axum::{Json, extract::State};

use crate::{
    app::AppState,
    data::models::{RegisterError, RegisterForm, RegisterResponse},
    data::repositories::UserRepository,
    features::auth::hash_password,
    utils::ValidatedJson,
};

#[axum::debug_handler]
pub async fn handle_register(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<RegisterForm>,
) -> Result<Json<RegisterResponse>, RegisterError> {
    let mut conn = state.pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        RegisterError::from(e)
    })?;

    if UserRepository::username_exists(&mut conn, &form.username)? {
        log::warn!("Registration attempt with existing username: {}", form.username);
        return Err(RegisterError::UsernameTaken);
    }

    let password_hash = hash_password(&form.password, state.bcrypt_cost)?;

    let user = UserRepository::create_user(&mut conn, &form.username, form.email.as_deref(), &password_hash)
        .map_err(|e| {
            log::error!("User creation failed: {}", e);
            RegisterError::DatabaseError(e)
        })?;

    log::info!("New user registered: {}", user.username);
    Ok(Json(RegisterResponse {
        message: "User created successfully".to_string(),
        user,
    }))
}
