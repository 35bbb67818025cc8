use std::sync::Arc;

use axum::{extract::State, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use super::validate;
use crate::auth::{self, password};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::UserView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth - Exchange credentials for a fresh token
///
/// Unknown email and wrong password answer with the same body, so a
/// caller cannot probe which half was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let errors = validate::login_errors(&payload.email, &payload.password);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let user = match state.store.find_user_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            tracing::info!("login rejected: unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !password::verify_password(&payload.password, &user.password) {
        tracing::info!(user_id = %user.id, "login rejected: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::generate_token(user.id)
        .map_err(|e| ApiError::internal(format!("token generation failed: {}", e)))?;

    Ok(Json(json!({ "token": token })))
}

/// GET /api/auth - Current user for the presented token, without the
/// password hash.
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .store
        .find_user_by_id(auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserView::from(user)))
}
