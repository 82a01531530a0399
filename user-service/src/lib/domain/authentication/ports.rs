use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;

/// Port for the register and login use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Created user profile
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered, found either by
    ///   the pre-check or by the store's uniqueness constraint
    /// * `Hashing` - Password hashing failed
    /// * `Store` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Check credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Token issuance failed
    /// * `Store` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AuthError>;
}
