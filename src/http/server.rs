//! HTTP server implementation for the dashboard

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{
    chart_handler, complaints_handler, export_handler, graph_handler, reload_handler,
    status_handler, visualizations_handler, zips_handler,
};
use crate::config::HttpConfig;
use crate::dashboard::Dashboard;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> Response {
    match Assets::get("index.html") {
        Some(page) => Html(String::from_utf8_lossy(page.data.as_ref()).into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "dashboard page not bundled").into_response(),
    }
}

/// Routes of the dashboard API and page
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(static_handler))
        .route("/api/status", get(status_handler))
        .route("/api/zips", get(zips_handler))
        .route("/api/visualizations", get(visualizations_handler))
        .route("/api/complaints", get(complaints_handler))
        .route("/api/chart", get(chart_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/export", get(export_handler))
        .route("/api/reload", post(reload_handler))
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}

/// HTTP server serving the dashboard
pub struct HttpServer {
    dashboard: Arc<Dashboard>,
    config: HttpConfig,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(dashboard: Arc<Dashboard>, config: HttpConfig) -> Self {
        Self { dashboard, config }
    }

    /// Serve until Ctrl-C
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.dashboard));

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Dashboard available at http://localhost:{}", self.config.port);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Dashboard server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, keep serving until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
