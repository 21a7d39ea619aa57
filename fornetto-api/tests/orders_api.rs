use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fornetto_api::{app, AppState};
use fornetto_order::{
    InMemoryCustomizationStore, InMemoryOrderStore, MockIngredientClient, OrderOrchestrator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestHarness {
    app: Router,
    ingredients: Arc<MockIngredientClient>,
}

fn harness(price_cents: i64) -> TestHarness {
    let ingredients = Arc::new(MockIngredientClient::new(price_cents));
    let customizations = Arc::new(InMemoryCustomizationStore::new());
    let orders = Arc::new(InMemoryOrderStore::new(customizations.clone()));
    let orchestrator = OrderOrchestrator::new(ingredients.clone(), orders, customizations);

    TestHarness {
        app: app(AppState {
            orchestrator: Arc::new(orchestrator),
        }),
        ingredients,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_create_closed_recipe_order() {
    let h = harness(3000);

    let (status, body) = send(
        &h.app,
        "POST",
        "/orders",
        Some(json!({
            "closed_recipe_id": 1,
            "size": "M",
            "crust_thickness": "S"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["closed_recipe_id"], 1);
    assert_eq!(body["size"], "M");
    assert_eq!(body["crust_thickness"], "S");
    assert_eq!(body["price_cents"], 3000);
    assert_eq!(body["customizations"], json!({}));
}

#[tokio::test]
async fn test_create_customized_order_completes_keys_and_ignores_client_price() {
    let h = harness(3000);

    let (status, body) = send(
        &h.app,
        "POST",
        "/orders",
        Some(json!({
            "size": "M",
            "crust_thickness": "S",
            "price_cents": 99,
            "customizations": {
                "1": {"kind": "A", "portion_quantity": 3, "observation": "A little bit melted."},
                "2": {"kind": "R", "portion_quantity": 1, "observation": "I have allergy to cheese."}
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["price_cents"], 3000);

    let first = &body["customizations"]["1"];
    assert_eq!(first["ingredient_id"], 1);
    assert_eq!(first["order_id"], 1);
    assert_eq!(first["kind"], "A");
    assert_eq!(first["portion_quantity"], 3);
    assert_eq!(first["observation"], "A little bit melted.");

    let second = &body["customizations"]["2"];
    assert_eq!(second["ingredient_id"], 2);
    assert_eq!(second["order_id"], 1);
    assert_eq!(second["kind"], "R");
    assert_eq!(second["portion_quantity"], 1);
    assert_eq!(second["observation"], "I have allergy to cheese.");
}

#[tokio::test]
async fn test_create_surfaces_pricing_outage_as_bad_gateway() {
    let h = harness(3000);
    h.ingredients.fail_pricing();

    let (status, body) = send(
        &h.app,
        "POST",
        "/orders",
        Some(json!({"size": "M", "crust_thickness": "S"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Ingredient service failure");
}

#[tokio::test]
async fn test_get_order_returns_populated_map() {
    let h = harness(3000);
    send(
        &h.app,
        "POST",
        "/orders",
        Some(json!({
            "size": "L",
            "crust_thickness": "T",
            "customizations": {
                "5": {"kind": "S", "portion_quantity": 2}
            }
        })),
    )
    .await;

    let (status, body) = send(&h.app, "GET", "/orders/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["size"], "L");
    assert_eq!(body["customizations"]["5"]["order_id"], 1);
    assert_eq!(body["customizations"]["5"]["kind"], "S");
}

#[tokio::test]
async fn test_get_unknown_order_is_not_found() {
    let h = harness(3000);

    let (status, body) = send(&h.app, "GET", "/orders/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order 42 not found");
}

#[tokio::test]
async fn test_delete_reverses_inventory_then_removes_order() {
    let h = harness(3000);
    send(
        &h.app,
        "POST",
        "/orders",
        Some(json!({
            "size": "M",
            "crust_thickness": "S",
            "customizations": {
                "1": {"kind": "A", "portion_quantity": 3},
                "2": {"kind": "R", "portion_quantity": 1}
            }
        })),
    )
    .await;

    let (status, body) = send(&h.app, "DELETE", "/orders/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // The reversal saw the full fetched order, children included.
    let reversed = h.ingredients.reversed().await;
    assert_eq!(reversed.len(), 1);
    assert_eq!(reversed[0].customizations.len(), 2);

    let (status, _) = send(&h.app, "GET", "/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_order_is_not_found_without_side_effects() {
    let h = harness(3000);

    let (status, _) = send(&h.app, "DELETE", "/orders/9", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(h.ingredients.reversed().await.is_empty());
}

#[tokio::test]
async fn test_preflight_allows_only_unauthenticated_headers() {
    let h = harness(3000);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/orders")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
    // There is no authentication on this service.
    assert!(!allowed.contains("authorization"));
}

#[tokio::test]
async fn test_delete_keeps_order_when_reversal_fails() {
    let h = harness(3000);
    send(
        &h.app,
        "POST",
        "/orders",
        Some(json!({"size": "M", "crust_thickness": "S"})),
    )
    .await;
    h.ingredients.fail_reversal();

    let (status, _) = send(&h.app, "DELETE", "/orders/1", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    // No deletion was performed; the cancellation can be retried.
    let (status, _) = send(&h.app, "GET", "/orders/1", None).await;
    assert_eq!(status, StatusCode::OK);
}
