//! End-to-end tests for the /books routes, driven through the router

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::store::{FixedClock, SequentialIds};
use bookshelf_server::{build_router, AppState, ServerConfig, Shelf};

fn app() -> (Router, Arc<FixedClock>) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(FixedClock::new(start));
    let shelf = Shelf::with_ports(clock.clone(), Arc::new(SequentialIds::new()));
    let state = Arc::new(AppState::new(shelf));
    (build_router(state, &ServerConfig::default()), clock)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create(app: &Router, body: Value) -> String {
    let (status, value) = send(app, "POST", "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value["data"]["bookId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bookshelf-server");
    assert_eq!(body["books"], 0);

    create(&app, book("Dicoding", 100, 100, false)).await;
    let (_, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn dicoding_lifecycle() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/books", Some(book("Dicoding", 100, 100, false))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    let id = body["data"]["bookId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let stored = body["data"]["book"].clone();
    assert_eq!(stored["id"], id.as_str());
    assert_eq!(stored["name"], "Dicoding");
    assert_eq!(stored["finished"], true);
    assert_eq!(stored["insertedAt"], "2024-01-01T12:00:00.000Z");
    assert_eq!(stored["insertedAt"], stored["updatedAt"]);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{id}"),
        Some(book("Dicoding", 100, 150, false)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
    assert_eq!(body["data"]["book"], stored);

    let (status, body) = send(&app, "DELETE", &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let (status, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "fail", "message": "Buku tidak ditemukan"}));
}

#[tokio::test]
async fn create_without_name_is_rejected() {
    let (app, _) = app();
    let mut body = book("x", 10, 1, false);
    body.as_object_mut().unwrap().remove("name");

    let (status, body) = send(&app, "POST", "/books", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let (status, body) = send(&app, "POST", "/books", Some(book("", 10, 1, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");
}

#[tokio::test]
async fn create_with_overread_is_rejected() {
    let (app, _) = app();
    let (status, body) = send(&app, "POST", "/books", Some(book("Dicoding", 10, 11, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Belum ada buku yang tersimpan");
}

#[tokio::test]
async fn malformed_body_uses_fail_envelope() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal memproses permintaan. Payload tidak valid");

    let (status, _) = send(
        &app,
        "POST",
        "/books",
        Some(json!({"name": "Negative", "pageCount": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicated_query_param_uses_fail_envelope() {
    let (app, _) = app();
    create(&app, book("Dicoding", 100, 100, true)).await;

    let (status, body) = send(&app, "GET", "/books?reading=1&reading=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal memproses permintaan. Parameter query tidak valid"
    );
}

#[tokio::test]
async fn list_returns_projections_in_insertion_order() {
    let (app, _) = app();
    let first = create(&app, book("Buku A", 10, 0, false)).await;
    let second = create(&app, book("Buku B", 10, 10, true)).await;

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": {
                "books": [
                    {"id": first, "name": "Buku A", "publisher": "Dicoding Indonesia"},
                    {"id": second, "name": "Buku B", "publisher": "Dicoding Indonesia"}
                ]
            }
        })
    );
}

#[tokio::test]
async fn list_filters_compose() {
    let (app, _) = app();
    create(&app, book("Dicoding Done", 10, 10, true)).await;
    create(&app, book("Dicoding Open", 10, 3, true)).await;
    create(&app, book("Rust Done", 10, 10, false)).await;

    let names = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = send(&app, "GET", "/books?reading=1", None).await;
    assert_eq!(names(&body), ["Dicoding Done", "Dicoding Open"]);

    let (_, body) = send(&app, "GET", "/books?finished=1", None).await;
    assert_eq!(names(&body), ["Dicoding Done", "Rust Done"]);

    let (_, body) = send(&app, "GET", "/books?reading=1&finished=0", None).await;
    assert_eq!(names(&body), ["Dicoding Open"]);

    let (_, body) = send(&app, "GET", "/books?name=rust", None).await;
    assert_eq!(names(&body), ["Rust Done"]);

    let (_, body) = send(&app, "GET", "/books?name=DICODING&finished=1", None).await;
    assert_eq!(names(&body), ["Dicoding Done"]);
}

#[tokio::test]
async fn list_failures_are_distinguished() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/books?reading=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Parameter reading yang diminta tidak sesuai");

    create(&app, book("Rust", 10, 0, false)).await;

    let (status, body) = send(&app, "GET", "/books?finished=yes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Parameter finished yang diminta tidak sesuai");

    let (status, body) = send(&app, "GET", "/books?name=Dicoding", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Tidak ada buku yang ditemukan dengan nama yang mengandung \"Dicoding\""
    );

    let (status, body) = send(&app, "GET", "/books?reading=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Tidak ada buku yang ditemukan");
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_inserted_at() {
    let (app, clock) = app();
    let id = create(&app, book("Dicoding", 100, 10, false)).await;

    clock.advance(Duration::minutes(5));
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{id}"),
        Some(json!({
            "name": "Dicoding Revised",
            "year": 2022,
            "author": "Jane Doe",
            "summary": "Updated",
            "publisher": "Penerbit Baru",
            "pageCount": 200,
            "readPage": 200,
            "reading": true,
            "finished": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "success", "message": "Buku berhasil diperbarui"})
    );

    let (_, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
    let stored = &body["data"]["book"];
    assert_eq!(stored["id"], id.as_str());
    assert_eq!(stored["name"], "Dicoding Revised");
    assert_eq!(stored["publisher"], "Penerbit Baru");
    assert_eq!(stored["finished"], true);
    assert_eq!(stored["reading"], true);
    assert_eq!(stored["insertedAt"], "2024-01-01T12:00:00.000Z");
    assert_eq!(stored["updatedAt"], "2024-01-01T12:05:00.000Z");
}

#[tokio::test]
async fn update_failures() {
    let (app, _) = app();

    let (status, body) = send(&app, "PUT", "/books/missing", Some(book("x", 1, 0, false))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    let id = create(&app, book("Dicoding", 10, 0, false)).await;
    let (status, body) = send(&app, "PUT", &format!("/books/{id}"), Some(book("", 10, 0, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (_, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
    assert_eq!(body["data"]["book"]["name"], "Dicoding");
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let (app, _) = app();
    let keep_a = create(&app, book("A", 1, 0, false)).await;
    let doomed = create(&app, book("B", 1, 0, false)).await;
    let keep_c = create(&app, book("C", 1, 0, false)).await;

    let (status, _) = send(&app, "DELETE", &format!("/books/{doomed}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &format!("/books/{doomed}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");

    let (_, body) = send(&app, "GET", "/books", None).await;
    let ids: Vec<_> = body["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, [keep_a, keep_c]);
}
