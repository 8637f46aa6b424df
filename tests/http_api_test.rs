use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use nci::http::router;
use nci::data::GraphSource;
use nci::{Dashboard, FileSource};
use nci_graph::{MemoryClient, Session};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tower::ServiceExt;

fn csv_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Incident_zip,Complaint_type,Borough,Created_date").unwrap();
    writeln!(file, "10001,Noise,MANHATTAN,2024-01-02").unwrap();
    writeln!(file, "10001,Noise,MANHATTAN,2024-01-16").unwrap();
    writeln!(file, "10001,Illegal Parking,MANHATTAN,2024-01-03").unwrap();
    writeln!(file, "11201,Heat,BROOKLYN,2024-01-04").unwrap();
    file.flush().unwrap();
    file
}

fn app(file: &NamedTempFile) -> axum::Router {
    router(Arc::new(Dashboard::new(Box::new(FileSource::new(file.path())))))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_status_and_zips() {
    let file = csv_fixture();

    let (status, body) = get_json(app(&file), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], 4);
    assert_eq!(body["graph"], false);

    let (_, body) = get_json(app(&file), "/api/zips").await;
    assert_eq!(body["zips"], serde_json::json!(["10001", "11201"]));
}

#[tokio::test]
async fn test_visualization_choices() {
    let file = csv_fixture();
    let (status, body) = get_json(app(&file), "/api/visualizations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visualizations"].as_array().unwrap().len(), 5);
    assert_eq!(body["visualizations"][0]["id"], "bar-by-type");
}

#[tokio::test]
async fn test_chart_endpoint() {
    let file = csv_fixture();

    let (status, body) = get_json(app(&file), "/api/chart?zip=10001&viz=bar-by-type").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["empty"], false);
    assert_eq!(body["chart"]["kind"], "bar");
    assert_eq!(body["chart"]["bars"][0]["label"], "Noise");
    assert_eq!(body["chart"]["bars"][0]["count"], 2);

    let (_, body) = get_json(app(&file), "/api/chart?zip=10001&viz=weekly-trend").await;
    let counts: Vec<u64> = body["chart"]["points"].as_array().unwrap()
        .iter().map(|p| p["count"].as_u64().unwrap()).collect();
    assert_eq!(counts, vec![2, 0, 1]);

    let (_, body) = get_json(app(&file), "/api/chart?zip=99999&viz=pie-by-type").await;
    assert_eq!(body["empty"], true);
}

#[tokio::test]
async fn test_unsupported_visualization_is_bad_request() {
    let file = csv_fixture();
    let (status, body) = get_json(app(&file), "/api/chart?zip=10001&viz=radar").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("radar"));
}

#[tokio::test]
async fn test_graph_without_store_is_unavailable() {
    let file = csv_fixture();
    let (status, _) = get_json(app(&file), "/api/graph?zip=10001").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_export_download() {
    let file = csv_fixture();
    let resp = app(&file)
        .oneshot(Request::builder().uri("/api/export?zip=11201").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"complaints_11201.csv\""
    );
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        "Incident_zip,Complaint_type,Borough,Created_date\n11201,Heat,BROOKLYN,2024-01-04\n"
    );
}

#[tokio::test]
async fn test_missing_source_file_is_server_error() {
    let app = router(Arc::new(Dashboard::new(Box::new(FileSource::new("/nonexistent.csv")))));
    let (status, body) = get_json(app, "/api/zips").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Data load error"));
}

#[tokio::test]
async fn test_reload() {
    let file = csv_fixture();
    let dashboard = Arc::new(Dashboard::new(Box::new(FileSource::new(file.path()))));

    assert_eq!(dashboard.table().await.unwrap().len(), 4);
    {
        let mut handle = std::fs::OpenOptions::new().append(true).open(file.path()).unwrap();
        writeln!(handle, "10451,Noise,BRONX,2024-02-01").unwrap();
    }
    assert_eq!(dashboard.table().await.unwrap().len(), 4);

    let resp = router(dashboard.clone())
        .oneshot(Request::builder().method("POST").uri("/api/reload").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(dashboard.table().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_complaints_endpoint() {
    let file = csv_fixture();

    let (status, body) = get_json(app(&file), "/api/complaints?zip=10001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zip"], "10001");
    assert_eq!(body["count"], 3);
    assert_eq!(body["records"][0]["complaint_type"], "Noise");
    assert_eq!(body["records"][0]["created_date"], "2024-01-02");
    assert_eq!(body["records"][2]["complaint_type"], "Illegal Parking");

    let (status, body) = get_json(app(&file), "/api/complaints?zip=99999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_graph_endpoint_with_store() {
    let client = MemoryClient::new()
        .with_complaint("10001", "Illegal Parking", 45)
        .with_complaint("10001", "Noise", 120)
        .with_borough("10001", "MANHATTAN");
    let session = Arc::new(Session::open(Arc::new(client), Duration::from_secs(1)).await.unwrap());
    let dashboard = Dashboard::new(Box::new(GraphSource::new(session.clone()))).with_graph(session);
    let app = router(Arc::new(dashboard));

    let (status, body) = get_json(app, "/api/graph?zip=10001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"][0]["id"], "zip:10001");
    assert_eq!(body["nodes"][0]["kind"], "zip");
    assert_eq!(body["links"].as_array().unwrap().len(), 2);
    assert_eq!(body["links"][0]["target"], "complaint:Noise");
    assert_eq!(body["links"][0]["weight"], 120);
}

#[tokio::test]
async fn test_dashboard_page_escapes_dataset_text() {
    let file = csv_fixture();
    let (status, body) = get(app(&file), "/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("textContent"));
    assert!(!page.contains("innerHTML"));
}
