use std::fmt;

use chrono::Duration;

/// Minimum secret length recommended for HS256 (256 bits).
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

/// Default token lifetime.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Process-wide token settings.
///
/// Constructed once at startup and shared read-only; there are no setters.
#[derive(Clone)]
pub struct AuthConfig {
    signing_secret: Vec<u8>,
    token_expiry: Duration,
    leeway: Duration,
}

impl AuthConfig {
    /// Create a configuration with the given secret and token lifetime and
    /// no clock-skew leeway.
    pub fn new(signing_secret: impl Into<Vec<u8>>, token_expiry: Duration) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            token_expiry,
            leeway: Duration::zero(),
        }
    }

    /// Accept tokens for `leeway` past their expiry.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn signing_secret(&self) -> &[u8] {
        &self.signing_secret
    }

    pub fn token_expiry(&self) -> Duration {
        self.token_expiry
    }

    pub fn leeway(&self) -> Duration {
        self.leeway
    }

    /// Whether the secret carries at least 256 bits.
    pub fn has_recommended_secret_length(&self) -> bool {
        self.signing_secret.len() >= RECOMMENDED_SECRET_BYTES
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .field("leeway", &self.leeway)
            .finish()
    }
}
