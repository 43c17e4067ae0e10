//! Round-trip tests for the HTTP clients against a live in-process server.
//!
//! The server binds an ephemeral port and records what it receives, so the
//! tests can assert both directions of the wire contract: request shape and
//! correlation header out, decoded payloads and typed errors back.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::Router;
use common::{CorrelationId, ItemId};
use remote::{
    CatalogClient, CatalogItemDto, DecrementRequest, HttpCatalogClient, HttpInventoryClient,
    InventoryClient, RemoteError, ServiceClient, StockLevelDto,
};
use uuid::Uuid;

const KNOWN_ITEM: &str = "11111111-1111-1111-1111-111111111111";
const SERVER_QUANTITY: i32 = 7;

#[derive(Clone, Default)]
struct Recorded {
    correlations: Arc<Mutex<Vec<String>>>,
    created: Arc<Mutex<Vec<StockLevelDto>>>,
}

impl Recorded {
    fn note_correlation(&self, headers: &HeaderMap) {
        let value = headers
            .get(CorrelationId::HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        self.correlations.lock().unwrap().push(value);
    }

    fn last_correlation(&self) -> Option<String> {
        self.correlations.lock().unwrap().last().cloned()
    }
}

fn known_item() -> ItemId {
    ItemId::from_uuid(Uuid::parse_str(KNOWN_ITEM).unwrap())
}

async fn get_level(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<ItemId>,
) -> impl IntoResponse {
    recorded.note_correlation(&headers);
    if id == known_item() {
        (StatusCode::OK, Json(StockLevelDto::new(id, SERVER_QUANTITY))).into_response()
    } else {
        (StatusCode::NOT_FOUND, format!("Item with id {id} not found")).into_response()
    }
}

async fn create_level(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(level): Json<StockLevelDto>,
) -> impl IntoResponse {
    recorded.note_correlation(&headers);
    recorded.created.lock().unwrap().push(level);
    (StatusCode::CREATED, Json(level))
}

async fn decrement_level(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<ItemId>,
    Json(req): Json<DecrementRequest>,
) -> impl IntoResponse {
    recorded.note_correlation(&headers);
    if req.amount > SERVER_QUANTITY {
        (
            StatusCode::CONFLICT,
            format!("insufficient stock for item {id}"),
        )
            .into_response()
    } else {
        (
            StatusCode::OK,
            Json(StockLevelDto::new(id, SERVER_QUANTITY - req.amount)),
        )
            .into_response()
    }
}

async fn get_item(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<ItemId>,
) -> impl IntoResponse {
    recorded.note_correlation(&headers);
    if id == known_item() {
        let item = CatalogItemDto {
            id,
            name: "Keyboard".to_string(),
            price_per_unit_cents: 4999,
            category: "peripherals".to_string(),
        };
        (StatusCode::OK, Json(item)).into_response()
    } else {
        (StatusCode::NOT_FOUND, format!("Item with id {id} not found")).into_response()
    }
}

async fn echo(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(body)
}

async fn boom() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "kaboom")
}

/// Binds an ephemeral port, serves the fixture routes, and returns the base
/// URL plus the recorder.
async fn spawn_server() -> (String, Recorded) {
    let recorded = Recorded::default();

    let inventory = Router::new()
        .route("/items", post(create_level))
        .route("/items/{id}", get(get_level))
        .route("/items/{id}/decrement", post(decrement_level));
    let catalog = Router::new().route("/items/{id}", get(get_item));

    let app = Router::new()
        .nest("/api/v1/inventory", inventory)
        .nest("/api/v1/catalog", catalog)
        .route("/echo", put(echo))
        .route("/boom", get(boom))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorded)
}

#[tokio::test]
async fn fetch_level_decodes_payload_and_sends_correlation_header() {
    let (base, recorded) = spawn_server().await;
    let client = HttpInventoryClient::new(format!("{base}/api/v1/inventory"));
    let correlation = CorrelationId::new("corr-level-1");

    let level = client
        .fetch_level(known_item(), &correlation)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(level.id, known_item());
    assert_eq!(level.quantity, SERVER_QUANTITY);
    assert_eq!(recorded.last_correlation().as_deref(), Some("corr-level-1"));
}

#[tokio::test]
async fn fetch_level_maps_404_to_none() {
    let (base, _recorded) = spawn_server().await;
    let client = HttpInventoryClient::new(format!("{base}/api/v1/inventory"));

    let level = client
        .fetch_level(ItemId::new(), &CorrelationId::generate())
        .await
        .unwrap();

    assert!(level.is_none());
}

#[tokio::test]
async fn create_level_posts_the_level_body() {
    let (base, recorded) = spawn_server().await;
    let client = HttpInventoryClient::new(format!("{base}/api/v1/inventory"));
    let item_id = ItemId::new();

    client
        .create_level(StockLevelDto::empty(item_id), &CorrelationId::generate())
        .await
        .unwrap();

    let created = recorded.created.lock().unwrap().clone();
    assert_eq!(created, vec![StockLevelDto::new(item_id, 0)]);
}

#[tokio::test]
async fn decrement_decodes_the_new_level() {
    let (base, _recorded) = spawn_server().await;
    let client = HttpInventoryClient::new(format!("{base}/api/v1/inventory"));

    let level = client
        .decrement_level(known_item(), 3, &CorrelationId::generate())
        .await
        .unwrap();

    assert_eq!(level.quantity, SERVER_QUANTITY - 3);
}

#[tokio::test]
async fn decrement_conflict_surfaces_status_and_body() {
    let (base, _recorded) = spawn_server().await;
    let client = HttpInventoryClient::new(format!("{base}/api/v1/inventory"));

    let err = client
        .decrement_level(known_item(), SERVER_QUANTITY + 1, &CorrelationId::generate())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert!(err.to_string().contains("insufficient stock"));
}

#[tokio::test]
async fn fetch_item_decodes_catalog_payload() {
    let (base, recorded) = spawn_server().await;
    let client = HttpCatalogClient::new(format!("{base}/api/v1/catalog"));
    let correlation = CorrelationId::new("corr-item-1");

    let item = client
        .fetch_item(known_item(), &correlation)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(item.name, "Keyboard");
    assert_eq!(item.price_per_unit_cents, 4999);
    assert_eq!(recorded.last_correlation().as_deref(), Some("corr-item-1"));

    let missing = client
        .fetch_item(ItemId::new(), &correlation)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn put_round_trips_json() {
    let (base, _recorded) = spawn_server().await;
    let client = ServiceClient::new("fixture", base);

    let body = serde_json::json!({ "quantity": 9 });
    let echoed: serde_json::Value = client
        .put("/echo", &body, &CorrelationId::generate())
        .await
        .unwrap();

    assert_eq!(echoed, body);
}

#[tokio::test]
async fn non_success_status_preserves_the_body_text() {
    let (base, _recorded) = spawn_server().await;
    let client = ServiceClient::new("fixture", base);

    let err = client
        .get::<serde_json::Value>("/boom", &CorrelationId::generate())
        .await
        .unwrap_err();

    match err {
        RemoteError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "kaboom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let client = ServiceClient::new("nowhere", "http://127.0.0.1:1");

    let err = client
        .get::<serde_json::Value>("/items", &CorrelationId::generate())
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Transport { .. }));
    assert_eq!(err.status(), None);
}
