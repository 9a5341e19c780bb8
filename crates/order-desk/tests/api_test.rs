use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use order_desk::api::{self, AppState};
use order_desk::lifecycle::RestaurantSystem;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(system: &RestaurantSystem) -> Router {
    let state = AppState {
        menu: system.menu_client.clone(),
        orders: system.order_client.clone(),
    };
    api::router(state, vec![HeaderValue::from_static("http://localhost:5173")])
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

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

fn asha() -> Value {
    json!({
        "name": "Asha",
        "phone": "9999999999",
        "tableNo": "4",
        "items": [{ "name": "Tea", "price": 20, "quantity": 2 }],
        "total": 40
    })
}

#[tokio::test]
async fn test_health() {
    let system = RestaurantSystem::new(8);
    let (status, body) = send(&app(&system), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["time"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_order_flow_over_http() {
    let system = RestaurantSystem::new(8);
    let app = app(&system);

    let (status, order) = send(&app, Method::POST, "/api/orders", Some(asha())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["tableNo"], 4);
    let id = order["id"].as_u64().unwrap();

    let (status, pending) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending, json!([order]));

    let uri = format!("/api/orders/{id}/complete");
    let (status, completed) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "completed");
    assert!(completed["completedAt"].is_string());

    let (_, pending) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(pending, json!([]));
    let (_, history) = send(&app, Method::GET, "/api/orders/history", None).await;
    assert_eq!(history, json!([completed]));

    let (status, located) = send(&app, Method::GET, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(located["location"], "history");

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_put_status_completes() {
    let system = RestaurantSystem::new(8);
    let app = app(&system);
    let (_, order) = send(&app, Method::POST, "/api/orders", Some(asha())).await;
    let uri = format!("/api/orders/{}", order["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "status": "pending" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("status"));

    let body = json!({ "status": "completed" });
    let (status, body) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_invalid_orders_are_rejected() {
    let system = RestaurantSystem::new(8);
    let app = app(&system);

    let mut bad_phone = asha();
    bad_phone["phone"] = json!("12345");
    let (status, body) = send(&app, Method::POST, "/api/orders", Some(bad_phone)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid phone: must be exactly 10 digits");

    let mut no_table = asha();
    no_table["tableNo"] = json!("");
    let (status, body) = send(&app, Method::POST, "/api/orders", Some(no_table)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid tableNo: is required");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, pending) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(pending, json!([]));
}

#[tokio::test]
async fn test_bad_path_ids() {
    let system = RestaurantSystem::new(8);
    let app = app(&system);

    let (status, body) = send(&app, Method::PATCH, "/api/orders/abc/complete", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid id: abc");

    let (status, _) = send(&app, Method::PATCH, "/api/orders/42/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/orders/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_crud_over_http() {
    let system = RestaurantSystem::new(8);
    let app = app(&system);

    let (status, item) = send(
        &app,
        Method::POST,
        "/api/menu",
        Some(json!({ "name": "Masala Dosa", "description": "Crisp", "price": "80" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["price"], 80.0);
    let uri = format!("/api/menu/{}", item["id"]);

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({ "price": 99.5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 99.5);
    assert_eq!(updated["name"], "Masala Dosa");
    assert_eq!(updated["description"], "Crisp");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "price": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid price: must not be negative");

    let (status, _) = send(&app, Method::PUT, "/api/menu/77", Some(json!({ "price": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/api/menu", Some(json!({ "price": 10 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid name: is required");

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }
    let (_, menu) = send(&app, Method::GET, "/api/menu", None).await;
    assert_eq!(menu, json!([]));
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let system = RestaurantSystem::new(8);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/orders")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();
    let response = app(&system).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}
