use thiserror::Error;

/// Error type for password operations.
///
/// Only raised when the environment fails (salt entropy, parameter setup).
/// Verification never errors: a malformed stored hash simply does not match.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
