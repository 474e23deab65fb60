use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use overland_booking::config::AppConfig;
use overland_booking::db;
use overland_booking::routes;
use overland_booking::state::AppState;

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        cors_origin: None,
    }
}

fn test_state() -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState::new(conn, test_config()))
}

fn test_app(state: Arc<AppState>) -> Router {
    routes::router(state)
}

fn booking_body(service_id: &str, start: &str, end: &str) -> String {
    serde_json::json!({
        "serviceId": service_id,
        "startAt": start,
        "endAt": end,
        "customerName": "A B",
        "customerEmail": "a@b.com",
        "customerPhone": "5551234567",
    })
    .to_string()
}

fn post_booking(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/bookings")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = test_app(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ── Health & Catalog ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let (status, json) = send(&state, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_list_services() {
    let state = test_state();
    let (status, json) = send(&state, get("/services")).await;
    assert_eq!(status, StatusCode::OK);

    let services = json["services"].as_array().unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0]["id"], "jeep-wrangler");
    assert_eq!(services[0]["type"], "VEHICLE");
    assert_eq!(services[0]["active"], true);
    assert_eq!(services[1]["active"], false);
}

#[tokio::test]
async fn test_get_service() {
    let state = test_state();
    let (status, json) = send(&state, get("/services/jeep-wrangler")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"]["priceFromUsd"], 180);

    let (status, json) = send(&state, get("/services/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Service not found");
}

// ── Create ──

#[tokio::test]
async fn test_create_booking_and_conflict() {
    let state = test_state();

    let (status, json) = send(
        &state,
        post_booking(booking_body("jeep-wrangler", "2026-03-01T10:00", "2026-03-04T10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["days"], 3);
    let booking = &json["booking"];
    assert_eq!(booking["serviceId"], "jeep-wrangler");
    assert_eq!(booking["startDate"], "2026-03-01T10:00:00.000Z");
    assert_eq!(booking["endDate"], "2026-03-04T10:00:00.000Z");
    assert_eq!(booking["startLocal"], "2026-03-01T10:00");
    assert_eq!(booking["timeZone"], "America/Denver");
    assert_eq!(booking["customerEmail"], "a@b.com");
    assert!(booking["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(booking["createdAt"].as_str().is_some_and(|s| s.ends_with('Z')));
    assert_eq!(json["quote"]["totalCents"], 54_000);

    let (status, json) = send(
        &state,
        post_booking(booking_body("jeep-wrangler", "2026-03-02T10:00", "2026-03-05T10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Dates not available");
}

#[tokio::test]
async fn test_abutting_booking_accepted() {
    let state = test_state();

    let (status, _) = send(
        &state,
        post_booking(booking_body("jeep-wrangler", "2026-02-10T00:00", "2026-02-13T00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &state,
        post_booking(booking_body("jeep-wrangler", "2026-02-12T00:00", "2026-02-15T00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &state,
        post_booking(booking_body("jeep-wrangler", "2026-02-13T00:00", "2026-02-16T00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_booking_client_errors() {
    let state = test_state();

    let cases = [
        (
            r#"{"serviceId":"jeep-wrangler","startAt":"2026-03-01T10:00"}"#.to_string(),
            "Missing fields",
        ),
        (
            booking_body("jeep-wrangler", "soon", "2026-03-04T10:00"),
            "Invalid date/time",
        ),
        (
            booking_body("jeep-wrangler", "2026-03-04T10:00", "2026-03-01T10:00"),
            "Invalid date range",
        ),
        (
            booking_body("jeep-wrangler", "2026-03-01T10:00", "2026-03-03T10:00"),
            "Minimum booking is 3 days",
        ),
        (
            booking_body("bike-rental", "2026-03-01T10:00", "2026-03-05T10:00"),
            "Service is not available for booking",
        ),
    ];

    for (body, expected) in cases {
        let (status, json) = send(&state, post_booking(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{expected}");
        assert_eq!(json["error"], expected);
    }
}

#[tokio::test]
async fn test_create_booking_contact_checks() {
    let state = test_state();

    let mut body: serde_json::Value =
        serde_json::from_str(&booking_body("jeep-wrangler", "2026-03-01", "2026-03-05")).unwrap();
    body["customerEmail"] = "a@b".into();
    let (status, json) = send(&state, post_booking(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid email");

    body["customerEmail"] = "a@b.com".into();
    body["customerPhone"] = "555-1234".into();
    let (status, json) = send(&state, post_booking(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid phone number");

    body["customerPhone"] = "+1 (555) 123-4567".into();
    body["timeZone"] = "America/Los_Angeles".into();
    let (status, json) = send(&state, post_booking(body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["booking"]["timeZone"], "America/Los_Angeles");
}

#[tokio::test]
async fn test_create_booking_unknown_service() {
    let state = test_state();
    let (status, json) = send(
        &state,
        post_booking(booking_body("hot-air-balloon", "2026-03-01", "2026-03-05")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Service not found");
}

#[tokio::test]
async fn test_create_booking_malformed_json() {
    let state = test_state();
    let (status, json) = send(&state, post_booking("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
}

// ── Listing ──

#[tokio::test]
async fn test_list_requires_service_id() {
    let state = test_state();
    let (status, json) = send(&state, get("/bookings")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "serviceId is required");
}

#[tokio::test]
async fn test_list_sorted_scoped_and_stable() {
    let state = test_state();

    for (start, end) in [
        ("2026-06-20T10:00", "2026-06-25T10:00"),
        ("2026-06-01T10:00", "2026-06-04T10:00"),
        ("2026-06-10T10:00", "2026-06-14T10:00"),
    ] {
        let (status, _) = send(&state, post_booking(booking_body("jeep-wrangler", start, end))).await;
        assert_eq!(status, StatusCode::OK);
    }

    // Rows for another service id written directly; they must never leak into the listing.
    {
        let conn = state.db.lock().unwrap();
        conn.execute(
            "INSERT INTO bookings (id, service_id, start_at, end_at, start_local, end_local, time_zone,
                                   customer_name, customer_email, customer_phone, created_at)
             VALUES ('other', 'bike-rental', '2026-06-01 00:00:00', '2026-06-05 00:00:00',
                     '2026-06-01', '2026-06-05', 'America/Denver', 'C', 'c@d.com', '5550000000',
                     '2026-01-01 00:00:00')",
            [],
        )
        .unwrap();
    }

    let (status, first) = send(&state, get("/bookings?serviceId=jeep-wrangler")).await;
    assert_eq!(status, StatusCode::OK);

    let bookings = first["bookings"].as_array().unwrap();
    let starts: Vec<&str> = bookings
        .iter()
        .map(|b| b["startDate"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["2026-06-01", "2026-06-10", "2026-06-20"]);
    assert!(bookings.iter().all(|b| b["serviceId"] == "jeep-wrangler"));
    assert_eq!(bookings[0]["endDate"], "2026-06-04");

    let (_, second) = send(&state, get("/bookings?serviceId=jeep-wrangler")).await;
    assert_eq!(first, second);

    let (status, other) = send(&state, get("/bookings?serviceId=bike-rental")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(other["bookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unavailable_days() {
    let state = test_state();

    let (status, _) = send(
        &state,
        post_booking(booking_body("jeep-wrangler", "2099-07-10T10:00", "2099-07-13T10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&state, get("/bookings/unavailable?serviceId=jeep-wrangler")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["notBefore"].is_string());
    assert_eq!(
        json["days"],
        serde_json::json!(["2099-07-10", "2099-07-11", "2099-07-12", "2099-07-13"])
    );

    let (status, _) = send(&state, get("/bookings/unavailable")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Quote ──

#[tokio::test]
async fn test_quote() {
    let state = test_state();

    let (status, json) = send(
        &state,
        get("/quote?serviceId=jeep-wrangler&startAt=2026-03-01T10:00&endAt=2026-03-16T10:00"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["days"], 15);
    assert_eq!(json["quote"]["discountPct"], 20);
    assert_eq!(json["quote"]["subtotalCents"], 270_000);
    assert_eq!(json["quote"]["totalCents"], 216_000);

    let (status, json) = send(
        &state,
        get("/quote?serviceId=jeep-wrangler&startAt=2026-03-01T10:00&endAt=2026-03-02T10:00"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Minimum booking is 3 days");

    let (status, json) = send(&state, get("/quote?serviceId=jeep-wrangler")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing fields");
}
