// Shared helpers for driving the router without a running server

#![allow(dead_code)]

use std::fs;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use dose_web::{create_router, AppState, Config};
use tempfile::TempDir;
use tower::ServiceExt;

/// Linear bundle: dose = 0.01 * glucose + 0.01 * kcal + 1.0 * breakfast
pub const LINEAR_MODEL: &str = r#"{
    "name": "test_linear",
    "features": ["glucose_level", "adj_carbs_g", "meal_breakfast"],
    "model": {"type": "linear", "coefficients": [0.01, 0.01, 1.0], "intercept": 0.0}
}"#;

/// Router plus a browser-like cookie holder
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
    pub dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestClient {
    pub fn new(model: Option<&str>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let model_path = dir.path().join("insulin_predictor_final.json");
        if let Some(body) = model {
            fs::write(&model_path, body).expect("write model bundle");
        }

        let config = Config {
            port: 0,
            secret_key: "integration-test-secret".to_string(),
            ephemeral_secret: false,
            debug: false,
            user_store_path: dir.path().join("Logs").join("users.json"),
            model_path,
            session_hours: 1,
        };

        Self {
            router: create_router(AppState::new(config)),
            cookie: None,
            dir,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(form)).await
    }

    /// Forget the session cookie, like a fresh browser
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_owned())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router is infallible");

        self.capture_cookie(&response);

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn capture_cookie(&mut self, response: &Response<Body>) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            if let Ok(raw) = value.to_str() {
                if let Some(pair) = raw.split(';').next() {
                    if pair.starts_with("session=") {
                        self.cookie = Some(pair.to_owned());
                    }
                }
            }
        }
    }

    pub async fn signup_and_login(&mut self, username: &str, password: &str) {
        let form = format!("username={username}&password={password}");
        let res = self.post_form("/signup", &form).await;
        assert_eq!(res.location.as_deref(), Some("/login"));

        let res = self.post_form("/login", &form).await;
        assert_eq!(res.location.as_deref(), Some("/instructions"));
    }
}

impl TestResponse {
    pub fn is_redirect_to(&self, target: &str) -> bool {
        self.status.is_redirection() && self.location.as_deref() == Some(target)
    }
}
