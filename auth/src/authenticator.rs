use crate::config::AuthConfig;
use crate::identity::Identity;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level credential operations by coordinating
/// password hashing and token handling. Holds only immutable configuration.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Signing secret and token lifetime
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(config: AuthConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(config),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// Callers without a stored hash pass [`PLACEHOLDER_HASH`] so the work
    /// done matches a real check.
    ///
    /// [`PLACEHOLDER_HASH`]: crate::password::PLACEHOLDER_HASH
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `identity`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity the token will assert
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unreadable)
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate a bearer token and return its identity.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<Identity, TokenError> {
        self.token_service.validate(token)
    }
}
