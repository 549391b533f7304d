use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value as Json;
use tower::ServiceExt;

use tabular_dashboard::server::{create_router, AppState, ServerConfig};
use tabular_dashboard::store::DatasetStore;

const BOUNDARY: &str = "----tabular-dashboard-test";

const ORDERS_CSV: &str = "OrderDate,TerritoryID,Status,TotalDue,SubTotal\n\
                          2024-01-01,1,5,100,90\n\
                          2024-01-02,2,5,50,45\n\
                          2024-01-01,2,4,25,\n";

fn app_with(config: ServerConfig) -> (Router, Arc<DatasetStore>) {
    let store = Arc::new(DatasetStore::new());
    let state = AppState::new(Arc::clone(&store), &config);
    (create_router(state, &config), store)
}

fn app() -> (Router, Arc<DatasetStore>) {
    app_with(ServerConfig::default())
}

fn multipart_body(field: &str, file_name: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(field: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(field, file_name, contents)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Json) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Json::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn upload_orders(app: &Router) -> String {
    let (status, body) = send(app, upload_request("file", "orders.csv", ORDERS_CSV.as_bytes())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn upload_returns_summary_and_stores_dataset() {
    let (app, store) = app();
    let (status, body) = send(&app, upload_request("file", "orders.csv", ORDERS_CSV.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "orders.csv");
    assert_eq!(body["rowCount"], 3);
    assert_eq!(body["columnCount"], 5);
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn dataset_lifecycle() {
    let (app, store) = app();
    let id = upload_orders(&app).await;

    let (status, list) = send(&app, get("/api/datasets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
    assert!(list[0].get("data").is_none());
    assert!(list[0]["uploadedAt"].is_string());

    let (status, dataset) = send(&app, get(&format!("/api/datasets/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dataset["columns"][3], "TotalDue");
    assert_eq!(dataset["data"].as_array().unwrap().len(), 3);
    assert_eq!(dataset["data"][0]["TotalDue"], 100);
    assert!(dataset["data"][2]["SubTotal"].is_null());

    let (status, body) = send(&app, delete(&format!("/api/datasets/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(store.is_empty());

    let (status, body) = send(&app, get(&format!("/api/datasets/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Dataset not found");

    let (status, _) = send(&app, delete(&format!("/api/datasets/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_and_analytics_views() {
    let (app, _) = app();
    let id = upload_orders(&app).await;

    let (status, dash) = send(&app, get(&format!("/api/datasets/{id}/dashboard"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dash["metrics"]["totalSales"], 310.0);
    assert_eq!(dash["metrics"]["orderCount"], 3);
    assert_eq!(dash["metrics"]["topTerritory"], "2");
    assert_eq!(dash["barData"][0]["name"], "1");
    assert_eq!(dash["barData"][1]["value"], 75.0);
    assert_eq!(dash["pieData"][0]["name"], "5");
    assert_eq!(dash["pieData"][0]["value"], 2.0);

    let (status, analytics) = send(&app, get(&format!("/api/datasets/{id}/analytics"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["lineData"][0]["name"], "1/1/2024");
    assert_eq!(analytics["lineData"][0]["value"], 125.0);
    assert_eq!(analytics["territoryData"][0]["name"], "1");
    assert!(analytics["pieData"].is_array());
}

#[tokio::test]
async fn upload_rejects_unsupported_suffix() {
    let (app, store) = app();
    let (status, body) = send(&app, upload_request("file", "data.txt", b"a,b\n1,2\n")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported file type");
    assert!(store.is_empty());
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let (app, _) = app();
    let (status, body) = send(&app, upload_request("attachment", "orders.csv", ORDERS_CSV.as_bytes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn upload_of_header_only_file_is_bad_request() {
    let (app, store) = app();
    let (status, body) = send(&app, upload_request("file", "empty.csv", b"a,b,c\n")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File is empty or could not be parsed");
    assert!(store.is_empty());
}

#[cfg(feature = "excel")]
#[tokio::test]
async fn upload_of_corrupt_workbook_is_server_error_with_details() {
    let (app, _) = app();
    let (status, body) = send(&app, upload_request("file", "broken.xlsx", b"not a workbook")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process file");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn upload_over_size_limit_is_rejected() {
    let (app, store) = app_with(ServerConfig::default().with_max_upload_bytes(16));
    let (status, body) = send(&app, upload_request("file", "orders.csv", ORDERS_CSV.as_bytes())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "File too large");
    assert!(store.is_empty());
}

#[tokio::test]
async fn malformed_ids_are_not_found() {
    let (app, _) = app();
    for uri in [
        "/api/datasets/not-a-uuid",
        "/api/datasets/not-a-uuid/dashboard",
        "/api/datasets/00000000-0000-0000-0000-000000000000/analytics",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Dataset not found");
    }
}

#[tokio::test]
async fn upload_of_file_field_without_filename_is_bad_request() {
    let (app, store) = app();
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"\r\n\r\n");
    body.extend_from_slice(ORDERS_CSV.as_bytes());
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let req = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
    assert!(store.is_empty());
}

#[tokio::test]
async fn upload_of_semicolon_csv_is_split_into_columns() {
    let (app, _) = app();
    let (status, body) = send(&app, upload_request("file", "orders.csv", b"Status;TotalDue\nA;10\nB;5\n")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columnCount"], 2);
    assert_eq!(body["rowCount"], 2);
}
