//! User authentication: password hashing and bearer tokens.
//!
//! - **Passwords** (`password.rs`) - salted, iterated SHA-256 in a
//!   self-describing `sha256$<iterations>$<salt>$<hash>` string
//! - **Tokens** (`token.rs`) - HS256 JWTs carrying the user id and email
//!
//! The axum middleware that checks tokens lives in `http::middleware`.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{AuthUser, Claims, JwtKeys};

/// Authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Access denied, token missing!")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to issue token: {0}")]
    Issue(#[from] jsonwebtoken::errors::Error),
}
