use serde::Deserialize;
use serde::Serialize;

/// Authenticated principal carried inside a token.
///
/// Built once at login from the stored user record and handed back verbatim
/// by token validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    user_id: i64,
    email: String,
}

impl Identity {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
