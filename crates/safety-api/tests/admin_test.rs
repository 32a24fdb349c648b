//! Admin dashboard aggregation

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{MockGateway, create_app, create_app_with, signup_body};
use serde_json::json;

#[tokio::test]
async fn empty_store_gives_six_empty_lists() {
    let app = create_app();

    let (status, body) = app.get("/admin/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "users": [],
            "contacts": [],
            "reports": [],
            "locations": [],
            "sos": [],
            "selfDefence": []
        })
    );
}

#[tokio::test]
async fn dashboard_collects_every_collection() {
    let app = create_app();

    app.post("/signup", signup_body("admin-view@example.com", "secret")).await;
    app.post("/contact", json!({ "firstName": "A", "email": "a@example.com", "subject": "s", "message": "m" })).await;
    app.post("/report", json!({ "name": "B", "location": "Park", "description": "d", "contact": "c" })).await;
    app.post("/api/location", json!({ "userId": "u1", "latitude": 1.0, "longitude": 1.0, "timestamp": "2024-01-01T00:00:00Z" })).await;
    app.post("/api/location", json!({ "userId": "u2", "latitude": 2.0, "longitude": 2.0, "timestamp": "2024-01-02T00:00:00Z" })).await;
    app.post("/save-sos", json!({ "number": "+15551234567" })).await;
    app.post("/self-defence", json!({ "name": "C", "training": "basics" })).await;

    let (status, body) = app.get("/admin/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert!(body["users"][0].get("passwordDigest").is_none());
    assert_eq!(body["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(body["reports"][0]["location"], "Park");
    assert_eq!(body["locations"][0]["userId"], "u2");
    assert_eq!(body["locations"][1]["userId"], "u1");
    assert_eq!(body["sos"][0]["number"], "+15551234567");
    assert_eq!(body["selfDefence"][0]["training"], "basics");
}

#[tokio::test]
async fn admin_token_required_when_configured() {
    let app = create_app_with(MockGateway::default(), Some("letmein"));

    let (status, body) = app.get("/admin/api/data").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let wrong = Request::get("/admin/api/data")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.request(wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let right = Request::get("/admin/api/data")
        .header(header::AUTHORIZATION, "Bearer letmein")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.request(right).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn admin_token_does_not_gate_public_routes() {
    let app = create_app_with(MockGateway::default(), Some("letmein"));

    let (status, _) = app.get("/api/locations").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
