use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::password::PLACEHOLDER_HASH;
use auth::Authenticator;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedSession;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Register and login use cases.
///
/// Composes the user store with the credential primitives of [`Authenticator`].
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        tracing::info!(email = %command.email, "Registering user");

        if self.repository.exists_by_email(&command.email).await? {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(AuthError::UserAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        // The pre-check can race; a uniqueness violation from the store
        // arrives as EmailAlreadyExists and converts to UserAlreadyExists.
        let user = self
            .repository
            .insert(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AuthError> {
        tracing::info!(email = %command.email, "Login attempt");

        let Some(credentials) = self.repository.find_by_email(&command.email).await? else {
            // Spend the same Argon2 work as a wrong password.
            self.authenticator.verify_password(&command.password, PLACEHOLDER_HASH);
            tracing::debug!(email = %command.email, "Login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let identity = credentials.user.identity();
        let result = self
            .authenticator
            .authenticate(&command.password, &credentials.password_hash, &identity)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(email = %command.email, "Login failed: password mismatch");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => AuthError::Hashing(err),
                AuthenticationError::TokenError(err) => {
                    tracing::error!(error = %err, "Token issuance failed");
                    AuthError::Token(err)
                }
            })?;

        tracing::info!(user_id = %credentials.user.id, "Login successful");
        Ok(AuthenticatedSession {
            identity,
            user: credentials.user,
            access_token: result.access_token,
        })
    }
}
