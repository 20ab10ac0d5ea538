use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

#[derive(Debug)]
pub struct Store {
    next_id: u64,
    items: BTreeMap<u64, Item>,
}

impl Store {
    /// A store holding item 1, "first".
    pub fn seeded() -> Self {
        let mut items = BTreeMap::new();
        items.insert(
            1,
            Item {
                id: 1,
                name: "first".to_string(),
            },
        );
        Self { next_id: 2, items }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .route("/fail/text", get(fail_text))
        .route("/fail/json/{code}", get(fail_json))
        .route("/fail/large/{bytes}", get(fail_large))
        .route("/not-json", get(not_json))
        .route("/echo", any(echo))
        .route("/slow/{ms}", get(slow))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> (StatusCode, Json<Item>) {
    let mut store = db.write().await;
    let item = Item {
        id: store.next_id,
        name: input.name,
    };
    store.next_id += 1;
    store.items.insert(item.id, item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let store = db.read().await;
    match store.items.get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => not_found(),
    }
}

async fn delete_item(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let mut store = db.write().await;
    match store.items.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

async fn fail_text() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain")],
        "internal error",
    )
}

async fn fail_json(Path(code): Path<u16>) -> Response {
    let status = match StatusCode::from_u16(code) {
        Ok(status) if status.is_client_error() || status.is_server_error() => status,
        _ => {
            let body = Json(json!({ "error": "not an error status" }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
    };
    let reason = status
        .canonical_reason()
        .unwrap_or("unknown")
        .to_ascii_lowercase();
    (status, Json(json!({ "error": reason }))).into_response()
}

/// A 500 whose text body is `bytes` long.
async fn fail_large(
    Path(bytes): Path<usize>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain")],
        "x".repeat(bytes),
    )
}

async fn not_json() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], "hello")
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn slow(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_to_json() {
        let item = Item {
            id: 1,
            name: "first".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "first"}));
    }

    #[test]
    fn store_is_seeded_with_first_item() {
        let store = Store::seeded();
        assert_eq!(store.items.len(), 1);
        assert_eq!(store.items[&1].name, "first");
        assert_eq!(store.next_id, 2);
    }

    #[test]
    fn create_item_rejects_missing_name() {
        let result: Result<CreateItem, _> = serde_json::from_str(r#"{"id":3}"#);
        assert!(result.is_err());
    }
}
