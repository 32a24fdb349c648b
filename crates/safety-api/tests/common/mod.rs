//! Shared helpers for API integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use futures_util::future::BoxFuture;
use http_body_util::BodyExt;
use safety_alert::{AlertDispatcher, DispatchError, SmsGateway};
use safety_api::{AppState, AppStateInner, router};
use safety_db::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Gateway that records every attempt and optionally fails all of them
#[derive(Default, Clone)]
pub struct MockGateway {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl SmsGateway for MockGateway {
    fn send<'a>(&'a self, to: &'a str, body: &'a str) -> BoxFuture<'a, Result<(), DispatchError>> {
        self.sent.lock().unwrap().push((to.to_string(), body.to_string()));
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(DispatchError::Rejected { status: 500 })
            } else {
                Ok(())
            }
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub gateway: MockGateway,
}

pub fn create_app() -> TestApp {
    create_app_with(MockGateway::default(), None)
}

pub fn create_app_with(gateway: MockGateway, admin_token: Option<&str>) -> TestApp {
    let db = Database::open_in_memory().expect("in-memory database");
    let state = AppStateInner::new(
        db,
        AlertDispatcher::new(gateway.clone()),
        admin_token.map(str::to_string),
    );

    TestApp {
        router: router(state.clone()),
        state,
        gateway,
    }
}

impl TestApp {
    pub async fn request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap()).await
    }
}

pub fn signup_body(email: &str, password: &str) -> Value {
    json!({
        "firstName": "Priya",
        "lastName": "Sharma",
        "email": email,
        "password": password,
        "phone": "555-0100",
        "emergencyContact": "Anil Sharma",
        "emergencyPhone": "555-0199",
        "notifications": true
    })
}
