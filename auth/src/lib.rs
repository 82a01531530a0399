//! Authentication core
//!
//! Provides the credential and token primitives used by the user service:
//! - Password hashing (Argon2id)
//! - Stateless HS256 token issuance and validation
//! - Authentication coordination
//!
//! Nothing here touches storage or HTTP; callers look users up themselves and
//! hand the stored hash and identity in.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{AuthConfig, Identity, TokenService};
//! use chrono::Duration;
//!
//! let service = TokenService::new(AuthConfig::new(
//!     b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     Duration::hours(24),
//! ));
//! let identity = Identity::new(1, "alice@example.com");
//! let token = service.issue(&identity).unwrap();
//! assert_eq!(service.validate(&token).unwrap(), identity);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthConfig, Authenticator, Identity};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(AuthConfig::new(
//!     b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     Duration::hours(24),
//! ));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let identity = Identity::new(1, "alice@example.com");
//! let result = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), identity);
//! ```

pub mod authenticator;
pub mod config;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use identity::Identity;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
