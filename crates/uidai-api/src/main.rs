use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uidai_api::{build_engine, create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uidai_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        report = ?config.report_path,
        "Starting UIDAI API server"
    );

    let engine = build_engine(&config).map_err(|e| {
        tracing::error!("Failed to load datasets: {}", e);
        tracing::error!(
            "Remediation:\n\
            1. Run the cleaning stage to produce the *_clean.csv files\n\
            2. Point UIDAI_DATA_DIR at the directory that holds them\n\
            3. Check UIDAI_REPORT and UIDAI_CONFIG paths if set"
        );
        e
    })?;

    let state = Arc::new(AppState::new(Arc::new(engine)));

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
