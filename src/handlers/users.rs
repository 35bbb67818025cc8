use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use super::validate;
use crate::auth::{self, password};
use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/users - Register a new account
///
/// Validates the payload, rejects duplicate emails, hashes the password
/// with a fresh salt and answers with a signed token. No user fields are
/// echoed back; the client fetches them via GET /api/auth.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    let errors = validate::registration_errors(&payload.name, &payload.email, &payload.password);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    if state.store.find_user_by_email(&payload.email).await?.is_some() {
        tracing::info!(email = %payload.email, "registration rejected: email taken");
        return Err(ApiError::DuplicateUser);
    }

    let avatar = gravatar_url(&payload.email);
    let hash = password::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {}", e)))?;

    let user = User::new(payload.name, payload.email, hash, avatar);
    state.store.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, "user registered");

    let token = auth::generate_token(user.id)
        .map_err(|e| ApiError::internal(format!("token generation failed: {}", e)))?;

    Ok(Json(json!({ "token": token })))
}

/// Deterministic Gravatar URL for an email: 200px, PG-rated, with the
/// "mystery man" fallback image.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    let hash: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravatar_is_deterministic_and_normalized() {
        let a = gravatar_url("Ann@Example.com ");
        let b = gravatar_url("ann@example.com");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
        assert!(a.ends_with("?s=200&r=pg&d=mm"));
    }

    #[test]
    fn gravatar_differs_per_email() {
        assert_ne!(gravatar_url("a@example.com"), gravatar_url("b@example.com"));
    }
}
