use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Errors of the register and login flows.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User with this email already exists: {0}")]
    UserAlreadyExists(String),

    /// Covers both an unknown email and a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    Token(#[from] TokenError),

    #[error("User store error: {0}")]
    Store(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::UserAlreadyExists(email),
            other => AuthError::Store(other.to_string()),
        }
    }
}
