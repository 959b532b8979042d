use axum::{
    Router,
    routing::{get, post},
};

use crate::app::AppState;

pub mod account;
pub mod login;
pub mod register;

pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register::handle_register))
        .route("/login", post(login::handle_login))
        .route("/logout", post(login::handle_logout))
        .route("/me", get(account::current_account).delete(account::delete_account))
        .with_state(state)
}
