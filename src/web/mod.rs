//! HTTP layer for the directory

pub mod forms;
pub mod handlers;

pub use handlers::{AppState, router};

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Serve the directory API on the given port until shutdown
pub async fn run(state: AppState, port: u16) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Directory serving at http://localhost:{port}");
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
