use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use service::storage::JsonDocumentStore;
use tower::ServiceExt;

fn app() -> Router {
    server::startup::build_app(JsonDocumentStore::in_memory())
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(b)
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|b| b.to_string())).await
}

async fn create_service(app: &Router, body: Value) -> Value {
    let (status, res) = send(app, Method::POST, "/services", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{res}");
    res["data"].clone()
}

fn service_body(name: &str, price: f64, tags: &[&str]) -> Value {
    json!({
        "name": {"en": name},
        "category": "venue",
        "base_price": price,
        "vendor_id": "v1",
        "tags": tags,
    })
}

fn ids(res: &Value) -> Vec<String> {
    res["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}

fn ts(v: &Value) -> DateTime<Utc> {
    v.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn service_detail_is_enriched_with_vendor() {
    let app = app();
    let svc = create_service(
        &app,
        json!({"name": {"en": "Hall"}, "category": "venue", "base_price": 100, "vendor_id": "v1"}),
    )
    .await;
    let id = svc["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, _) = send(&app, Method::POST, "/vendors", Some(json!({"id": "v1", "name": "Acme"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, res) = send(&app, Method::GET, &format!("/services/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let data = &res["data"];
    assert_eq!(data["vendorDetails"]["name"], "Acme");
    assert_eq!(data["name"]["en"], "Hall");
    assert_eq!(data["category"], "venue");
    assert_eq!(data["base_price"], 100.0);
    assert_eq!(data["status"], "active");
    assert_eq!(data["is_deleted"], false);
    assert!(data["created_at"].is_string());
    assert!(data.get("_id").is_none());
    assert!(data["vendorDetails"].get("_id").is_none());
}

#[tokio::test]
async fn service_detail_without_vendor_omits_vendor_details() {
    let app = app();
    let svc = create_service(&app, service_body("Hall", 100.0, &[])).await;
    let (status, res) = send(&app, Method::GET, &format!("/services/{}", svc["id"].as_str().unwrap()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(res["data"].get("vendorDetails").is_none());
}

#[tokio::test]
async fn explicit_ids_are_kept_and_missing_ids_generated() {
    let app = app();
    let mut body = service_body("Hall", 1.0, &[]);
    body["id"] = json!("svc-1");
    assert_eq!(create_service(&app, body).await["id"], "svc-1");

    let a = create_service(&app, service_body("A", 1.0, &[])).await;
    let b = create_service(&app, service_body("B", 1.0, &[])).await;
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let app = app();
    let (status, res) = send(&app, Method::GET, "/services/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["code"], "NOT_FOUND");
    assert!(res["error"].is_string());
}

#[tokio::test]
async fn update_changes_only_supplied_fields_and_advances_updated_at() {
    let app = app();
    let (status, res) = send(&app, Method::PUT, "/services/nope", Some(json!({"category": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["code"], "NOT_FOUND");
    let (status, _) = send(&app, Method::GET, "/services/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "update must not upsert");

    let svc = create_service(&app, service_body("Hall", 100.0, &["indoor"])).await;
    let id = svc["id"].as_str().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let (status, res) = send(
        &app,
        Method::PUT,
        &format!("/services/{id}"),
        Some(json!({"base_price": 120, "id": "hijack", "created_at": "2000-01-01T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{res}");
    let updated = &res["data"];
    assert_eq!(updated["id"], svc["id"]);
    assert_eq!(updated["base_price"], 120.0);
    assert_eq!(updated["name"], svc["name"]);
    assert_eq!(updated["tags"], svc["tags"]);
    assert_eq!(updated["created_at"], svc["created_at"]);
    assert!(ts(&updated["updated_at"]) > ts(&svc["updated_at"]));
}

#[tokio::test]
async fn delete_hides_the_service_and_never_fails() {
    let app = app();
    let svc = create_service(&app, service_body("Hall", 100.0, &[])).await;
    let uri = format!("/services/{}", svc["id"].as_str().unwrap());

    let (status, res) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["deleted"], true);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, res) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["deleted"], false);

    let (status, _) = send(&app, Method::DELETE, "/services/never-existed", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, Method::GET, "/services", None).await;
    assert_eq!(list["pagination"]["total_items"], 0);
}

#[tokio::test]
async fn price_range_and_tag_filters_select_exact_sets() {
    let app = app();
    let cheap = create_service(&app, service_body("Cheap", 50.0, &["indoor"])).await;
    let mid = create_service(&app, service_body("Mid", 100.0, &["outdoor", "garden"])).await;
    let dear = create_service(&app, service_body("Dear", 150.0, &["outdoor"])).await;
    let gone = create_service(&app, service_body("Gone", 75.0, &["outdoor"])).await;
    send(&app, Method::DELETE, &format!("/services/{}", gone["id"].as_str().unwrap()), None).await;

    let id = |v: &Value| v["id"].as_str().unwrap().to_string();

    let (status, res) = send(&app, Method::GET, "/services?min_price=50&max_price=100", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&res), vec![id(&cheap), id(&mid)]);
    assert_eq!(res["pagination"]["total_items"], 2);

    let (_, res) = send(&app, Method::GET, "/services?tags=outdoor", None).await;
    assert_eq!(ids(&res), vec![id(&mid), id(&dear)]);

    let (_, res) = send(&app, Method::GET, "/services?tags=garden,indoor", None).await;
    assert_eq!(ids(&res), vec![id(&cheap), id(&mid)]);

    let (status, res) = send(
        &app,
        Method::POST,
        "/services/filter",
        Some(json!({"max_price": 120, "tags": ["outdoor"], "category": "venue"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&res), vec![id(&mid)]);
}

#[tokio::test]
async fn pages_are_disjoint_and_report_the_filtered_total() {
    let app = app();
    for i in 0..5 {
        create_service(&app, service_body(&format!("S{i}"), i as f64, &[])).await;
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let uri = format!("/services?page={page}&pageSize=2&sort_by=base_price&sort_order=asc");
        let (status, res) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["pagination"]["page"], page);
        assert_eq!(res["pagination"]["pageSize"], 2);
        assert_eq!(res["pagination"]["total_items"], 5);
        assert_eq!(res["pagination"]["total_pages"], 3);
        seen.extend(ids(&res));
    }
    assert_eq!(seen.len(), 5);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5);

    let (_, res) = send(&app, Method::GET, "/services?page=9&pageSize=2", None).await;
    assert_eq!(res["data"], json!([]));
    assert_eq!(res["pagination"]["total_items"], 5);
}

#[tokio::test]
async fn malformed_requests_are_validation_errors() {
    let app = app();
    for uri in [
        "/services?min_price=cheap",
        "/services?min_price=10&max_price=5",
        "/services?page=0",
        "/services?sort_by=base_price&sort_order=sideways",
        "/vendors?is_verified=perhaps",
    ] {
        let (status, res) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(res["code"], "VALIDATION_ERROR", "{uri}");
    }

    let (status, res) = send_raw(&app, Method::POST, "/services/filter", Some("{not json".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["code"], "VALIDATION_ERROR");

    let (status, res) = send(&app, Method::POST, "/services/filter", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["code"], "VALIDATION_ERROR");

    let (status, res) = send(&app, Method::POST, "/services", Some(json!({"name": {"en": "x"}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, Method::POST, "/services", Some(service_body("Neg", -1.0, &[]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/vendors",
        Some(json!({"name": "Acme", "contact": {"email": "nope"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vendor_crud_and_filters() {
    let app = app();
    let (status, res) = send(
        &app,
        Method::POST,
        "/vendors",
        Some(json!({"name": "Acme", "contact": {"email": "ops@acme.test"}, "business_type": "venue"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let acme = res["data"]["id"].as_str().unwrap().to_string();
    send(&app, Method::POST, "/vendors", Some(json!({"name": "Birch"}))).await;

    let (status, res) = send(&app, Method::PUT, &format!("/vendors/{acme}"), Some(json!({"is_verified": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["is_verified"], true);
    assert_eq!(res["data"]["contact"]["email"], "ops@acme.test");

    let (_, res) = send(&app, Method::GET, "/vendors?is_verified=true", None).await;
    assert_eq!(ids(&res), vec![acme.clone()]);
    let (_, res) = send(&app, Method::GET, "/vendors?business_type=venue", None).await;
    assert_eq!(ids(&res), vec![acme.clone()]);
    let (_, res) = send(&app, Method::GET, "/vendors", None).await;
    assert_eq!(res["pagination"]["total_items"], 2);

    let (status, _) = send(&app, Method::DELETE, &format!("/vendors/{acme}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, res) = send(&app, Method::GET, &format!("/vendors/{acme}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["code"], "NOT_FOUND");
    let (status, _) = send(&app, Method::PUT, &format!("/vendors/{acme}"), Some(json!({"name": "Back"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_returns_an_empty_list() {
    let app = app();
    create_service(&app, service_body("Hall", 1.0, &[])).await;
    for uri in ["/services/search?q=hall", "/services/search", "/services/search?q="] {
        let (status, res) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(res["data"], json!([]), "{uri}");
    }
}

#[tokio::test]
async fn health_metrics_and_openapi() {
    let app = app();
    let (status, res) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res, json!({"status": "ok"}));

    send(&app, Method::GET, "/services", None).await;
    let (status, res) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = res.as_str().unwrap();
    assert!(text.contains("service_catalog_http_requests_total"));
    assert!(text.contains("route=\"/services\""));

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/services/{id}").is_some());
    assert!(doc["paths"].get("/vendors").is_some());
}

#[tokio::test]
async fn rejected_query_strings_use_the_error_envelope() {
    let app = app();
    let (status, res) = send(&app, Method::GET, "/services/search?q=a&q=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["code"], "VALIDATION_ERROR");
    assert!(res["error"].as_str().unwrap().contains("duplicate field"));
}
