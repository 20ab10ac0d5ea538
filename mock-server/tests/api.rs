use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Item};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- items ---

#[tokio::test]
async fn seeded_item_is_served() {
    let resp = app().oneshot(get("/items/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"id": 1, "name": "first"}));
}

#[tokio::test]
async fn missing_item_is_json_404() {
    let resp = app().oneshot(get("/items/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "not found"}));
}

#[tokio::test]
async fn create_item_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"widget"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 2);
    assert_eq!(item.name, "widget");
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_item_returns_empty_204() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/1")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn bad_item_id_returns_400() {
    let resp = app().oneshot(get("/items/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- failure shapes ---

#[tokio::test]
async fn fail_text_is_plain_500() {
    let resp = app().oneshot(get("/fail/text")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    assert_eq!(&body_bytes(resp).await[..], b"internal error");
}

#[tokio::test]
async fn fail_json_uses_lowercase_reason() {
    let resp = app().oneshot(get("/fail/json/503")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "service unavailable"}));
}

#[tokio::test]
async fn fail_json_rejects_success_codes() {
    let resp = app().oneshot(get("/fail/json/200")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fail_large_sends_requested_size() {
    let resp = app().oneshot(get("/fail/large/2048")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 2048);
    assert!(body.iter().all(|b| *b == b'x'));
}

#[tokio::test]
async fn not_json_is_plain_200() {
    let resp = app().oneshot(get("/not-json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"hello");
}

// --- echo / slow ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/echo")
                .header("X-Trace", "abc")
                .header(http::header::CONTENT_TYPE, "text/plain")
                .body("payload".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["headers"]["x-trace"], "abc");
    assert_eq!(body["headers"]["content-type"], "text/plain");
    assert_eq!(body["body"], "payload");
}

#[tokio::test]
async fn echo_accepts_extension_methods() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PURGE")
                .uri("/echo")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["method"], "PURGE");
}

#[tokio::test]
async fn slow_eventually_answers() {
    let resp = app().oneshot(get("/slow/10")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({}));
}

// --- lifecycle ---

#[tokio::test]
async fn create_get_delete_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/items", r#"{"name":"gadget"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Item = body_json(resp).await;
    let id = created.id;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/items"))
        .await
        .unwrap();
    let items: Vec<Item> = body_json(resp).await;
    assert_eq!(items.len(), 2);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/items/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Item = body_json(resp).await;
    assert_eq!(fetched, created);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/items/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/items/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
