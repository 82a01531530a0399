use auth::Identity;

use crate::domain::user::models::User;

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub identity: Identity,
    pub user: User,
    pub access_token: String,
}
