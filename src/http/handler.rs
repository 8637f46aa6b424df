//! HTTP handlers for the dashboard API

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::chart::Visualization;
use crate::dashboard::Dashboard;
use crate::error::NciError;

/// `?zip=` query string
#[derive(Deserialize)]
pub struct ZipParams {
    pub zip: String,
}

/// `?zip=&viz=` query string
#[derive(Deserialize)]
pub struct ChartParams {
    pub zip: String,
    pub viz: String,
}

fn error_response(e: NciError) -> Response {
    let status = match &e {
        NciError::UnsupportedVisualization(_) => StatusCode::BAD_REQUEST,
        NciError::GraphStoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        NciError::DataLoad(_) | NciError::Config(_) | NciError::Export(_) => {
            error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Handler for dashboard status
pub async fn status_handler(State(dashboard): State<Arc<Dashboard>>) -> Response {
    match dashboard.table().await {
        Ok(table) => Json(json!({
            "status": "healthy",
            "version": crate::VERSION,
            "source": dashboard.describe_source(),
            "records": table.len(),
            "graph": dashboard.has_graph(),
        })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the zip selector
pub async fn zips_handler(State(dashboard): State<Arc<Dashboard>>) -> Response {
    match dashboard.zip_codes().await {
        Ok(zips) => Json(json!({ "zips": zips })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the visualization selector
pub async fn visualizations_handler() -> impl IntoResponse {
    let choices: Vec<_> = Visualization::ALL.iter()
        .map(|v| json!({ "id": v.slug(), "label": v.label() }))
        .collect();
    Json(json!({ "visualizations": choices }))
}

/// Handler for the raw records of a zip
pub async fn complaints_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(params): Query<ZipParams>,
) -> Response {
    match dashboard.records(&params.zip).await {
        Ok(records) => Json(json!({
            "zip": params.zip,
            "count": records.len(),
            "records": records,
        })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for a chart of a zip
pub async fn chart_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(params): Query<ChartParams>,
) -> Response {
    let viz = match params.viz.parse::<Visualization>() {
        Ok(viz) => viz,
        Err(e) => return error_response(e),
    };
    match dashboard.chart(&params.zip, viz).await {
        Ok(chart) => Json(json!({
            "empty": chart.is_empty(),
            "chart": chart,
        })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the complaint graph of a zip
pub async fn graph_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(params): Query<ZipParams>,
) -> Response {
    match dashboard.graph(&params.zip).await {
        Ok(graph) => Json(graph).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the CSV download of a zip
pub async fn export_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(params): Query<ZipParams>,
) -> Response {
    match dashboard.export(&params.zip).await {
        Ok(export) => (
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
                (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", export.file_name)),
            ],
            export.body,
        ).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler that drops the cached table
pub async fn reload_handler(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    dashboard.reload().await;
    StatusCode::NO_CONTENT
}
