use bcrypt::BcryptError;
use diesel::result::Error as DieselError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use super::User;

lazy_static! {
    pub static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
}

// Login specific errors
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Database error")]
    DatabaseError(DieselError),
    #[error("Hashing error")]
    HashingError(BcryptError),
    #[error("Session error: {0}")]
    SessionError(String),
    #[error("Connection pool error: {0}")]
    PoolError(String),
}

// Registration specific errors
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("Username already registered")]
    UsernameTaken,
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Hashing error")]
    HashingError(BcryptError),
    #[error("Connection pool error: {0}")]
    PoolError(String),
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3 to 50 characters"),
        regex(path = *USERNAME_RE, message = "Username may only contain letters, digits, '_', '.' and '-'")
    )]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, email: Option<&str>) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            password: password.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(form("lexi_99", "correct horse", None).validate().is_ok());
        assert!(form("lexi.b", "correct horse", Some("lexi@example.com")).validate().is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let errors = form("lexi", "short", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn rejects_bad_username_characters() {
        let errors = form("lexi smith", "correct horse", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(form("", "correct horse", None).validate().is_err());
    }

    #[test]
    fn login_form_requires_both_fields() {
        let login = LoginForm {
            username: "lexi".to_string(),
            password: String::new(),
        };
        let errors = login.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn rejects_malformed_email() {
        let errors = form("lexi", "correct horse", Some("not-an-email"))
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
