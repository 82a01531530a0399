use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::Identity;

/// JWT payload asserting an [`Identity`].
///
/// `sub` mirrors the user id as a string per RFC 7519; `user_id` and `email`
/// carry the identity itself. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Build claims for `identity`, issued at `issued_at` and valid for `expiry`.
    pub fn for_identity(identity: &Identity, issued_at: DateTime<Utc>, expiry: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: identity.user_id().to_string(),
            user_id: identity.user_id(),
            email: identity.email().to_string(),
            iat,
            exp: iat + expiry.num_seconds(),
        }
    }

    /// The identity asserted by these claims.
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.email.clone())
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at the exact second of `exp`, extended by
    /// `leeway_seconds` when configured.
    pub fn is_expired(&self, current_timestamp: i64, leeway_seconds: i64) -> bool {
        current_timestamp >= self.exp.saturating_add(leeway_seconds)
    }
}
