use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Header carrying the raw signed token. The client replays it verbatim
/// on every protected request; there is no `Bearer` scheme prefix.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user context extracted from the token.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.user_id }
    }
}

/// Token authentication middleware for the protected routes. Validates
/// the `x-auth-token` header and injects [`AuthUser`] into the request
/// extensions; no other side effects.
pub async fn token_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers).ok_or_else(|| {
        tracing::debug!("request without {} header rejected", TOKEN_HEADER);
        ApiError::unauthorized("No token, authorization denied")
    })?;

    let claims = auth::decode_token(&token).map_err(|e| {
        tracing::debug!("token rejected: {}", e);
        ApiError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(TOKEN_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}
