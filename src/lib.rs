use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::{delete, get, post, put};
use axum::{middleware as axum_middleware, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;
pub mod store;

use state::AppState;

/// Assemble the full application router around the shared state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/users", post(handlers::users::register))
        // GET /api/auth shares the path with the public login but sits
        // behind the token middleware.
        .route(
            "/api/auth",
            post(handlers::auth::login).get(
                handlers::auth::current_user
                    .layer(axum_middleware::from_fn(middleware::token_auth_middleware)),
            ),
        )
        // Protected posts resource
        .merge(posts_routes())
        // Global middleware: CORS wide open by design, see the API docs
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn posts_routes() -> Router<Arc<AppState>> {
    use handlers::posts;

    Router::new()
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/posts/:id", get(posts::get).delete(posts::delete))
        .route("/api/posts/like/:id", put(posts::like))
        .route("/api/posts/unlike/:id", put(posts::unlike))
        .route("/api/posts/comment/:id", post(posts::comment))
        .route(
            "/api/posts/comment/:id/:comment_id",
            delete(posts::delete_comment),
        )
        .route_layer(axum_middleware::from_fn(middleware::token_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "name": "ripple-api",
        "version": env!("CARGO_PKG_VERSION"),
        "msg": "API Running",
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("health probe failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": "unavailable"
                })),
            )
        }
    }
}
