//! Bearer token authentication.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use super::error::ApiError;
use super::state::AppState;
use crate::auth::AuthError;

/// Reject requests without a valid `Authorization: Bearer <token>` header.
///
/// On success the [`AuthUser`](crate::auth::AuthUser) is inserted into the
/// request extensions for handlers to extract.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let user = state.jwt.verify(token)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// The credential part of an `Authorization` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
