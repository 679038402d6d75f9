use axum::{Router, middleware, routing::get};
use qc_api::{
    config::ApiConfig,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{apply_security_headers, create_cors_layer, request_id_middleware},
    state::ApiState,
};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    qc_api::tracing::init_tracing(&config.env);
    let metrics_handle = init_metrics()?;

    let pool = qc_db::create_pool(&config.database_url, config.db_max_connections).await?;
    qc_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!("Database ready");

    let state = ApiState::new(&config, pool);

    let api = qc_api::router::router()
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(create_cors_layer(config.parsed_allowed_origins()));
    let api = apply_security_headers(api, config.env.clone());

    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle)
        .merge(api);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, environment = ?config.env, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
