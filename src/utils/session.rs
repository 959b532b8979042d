use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use crate::data::models::ApiError;

const USER_ID_KEY: &str = "user_id";
const USERNAME_KEY: &str = "username";

/// Starts a fresh session id for the logged-in user.
pub async fn set_user_session(
    session: &Session,
    user_id: i32,
    username: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    session.insert(USERNAME_KEY, username).await?;
    Ok(())
}

pub async fn get_current_user_id(
    session: &Session,
) -> Result<Option<i32>, tower_sessions::session::Error> {
    session.get::<i32>(USER_ID_KEY).await.map_err(|e| {
        log::error!("Failed to get user_id from session: {}", e);
        e
    })
}

/// Id of the logged-in user; requests without one are rejected with 401,
/// an unreadable session is a 500.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i32);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| ApiError::Session(message.to_string()))?;

        get_current_user_id(&session)
            .await?
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn empty_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn stored_identity_is_read_back() {
        let session = empty_session();
        assert_eq!(get_current_user_id(&session).await.unwrap(), None);

        set_user_session(&session, 7, "lexi").await.unwrap();
        assert_eq!(get_current_user_id(&session).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn unreadable_user_id_is_an_error_not_a_logout() {
        let session = empty_session();
        session.insert(USER_ID_KEY, "seven").await.unwrap();

        assert!(get_current_user_id(&session).await.is_err());

        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(session);
        let rejection = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
