use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiResponseBody;

/// Single message for every rejection; the reason is only logged.
const REJECTION_MESSAGE: &str = "Invalid or expired token";

/// Verified caller identity, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl From<auth::Identity> for AuthenticatedUser {
    fn from(identity: auth::Identity) -> Self {
        Self {
            user_id: UserId(identity.user_id()),
            email: identity.email().to_string(),
        }
    }
}

/// Why a request was turned away before reaching a protected handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingHeader,
    MalformedHeader,
    InvalidOrExpiredToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(ApiResponseBody::new_error(REJECTION_MESSAGE)),
        )
            .into_response()
    }
}

/// Middleware that validates the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let token =
        extract_bearer_token(req.headers().get(header::AUTHORIZATION)).map_err(|rejection| {
            tracing::warn!(reason = ?rejection, uri = %req.uri(), "Rejected request");
            rejection
        })?;

    let identity = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(
            reason = ?AuthRejection::InvalidOrExpiredToken,
            error = %e,
            "Token validation failed"
        );
        AuthRejection::InvalidOrExpiredToken
    })?;

    req.extensions_mut().insert(AuthenticatedUser::from(identity));

    Ok(next.run(req).await)
}

/// Parses `Authorization: Bearer <token>`.
///
/// The header must be visible ASCII and split on a single space into exactly
/// two parts, the first being `Bearer` and the second non-empty.
pub fn extract_bearer_token(value: Option<&HeaderValue>) -> Result<&str, AuthRejection> {
    let value = value.ok_or(AuthRejection::MissingHeader)?;
    let value = value.to_str().map_err(|_| AuthRejection::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthRejection::MalformedHeader),
    }
}
