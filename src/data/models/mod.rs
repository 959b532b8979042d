pub mod api_models;
pub mod auth_models;
pub mod card_models;
pub mod confidence_level_models;
pub mod review_models;
pub mod user_models;

pub use api_models::{ApiError, HealthResponse};
pub use auth_models::{LoginError, LoginForm, LoginResponse, RegisterError, RegisterForm, RegisterResponse};
pub use card_models::{Card, CardChanges, CreateCardRequest, NewCard, UpdateCardRequest};
pub use confidence_level_models::{ConfidenceLevel, ConfidenceLevelForm, NewConfidenceLevel, STARTER_LEVELS};
pub use review_models::{
    CreateReviewScheduleRequest, NewReviewSchedule, ReviewSchedule, ReviewScheduleChanges, SessionParams,
};
pub use user_models::{NewUser, User};
