use ripple_api::{app, config, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGO_URI, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting ripple-api in {:?} mode", config.environment);

    let state = AppState::from_config(config)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize store: {}", e));

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("ripple-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
