//! Common test utilities for integration tests
//!
//! This module provides shared setup and teardown for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use nexuskart_backend::{config::AppConfig, routes, state::AppState};
use sqlx::PgPool;
use tower::ServiceExt;

/// Multipart boundary used by the request helpers
const BOUNDARY: &str = "nexuskart-test-boundary";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: PgPool,
}

impl TestApp {
    /// Create a new test application with a real database
    pub async fn new() -> Self {
        let config = test_config();
        let pool = create_test_pool(&config.database.url).await;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config).expect("Failed to build app state");
        let app = routes::create_router(state);

        Self { app, pool }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.request("GET", path, None, None, Vec::new()).await
    }

    /// Make a GET request, returning the raw body bytes (for images)
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        self.request("GET", path, Some(token), None, Vec::new())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request(
            "POST",
            path,
            None,
            Some("application/json"),
            body.as_bytes().to_vec(),
        )
        .await
    }

    /// Make a POST request with JSON body and a bearer token
    pub async fn post_auth(&self, path: &str, token: &str, body: &str) -> (StatusCode, String) {
        self.request(
            "POST",
            path,
            Some(token),
            Some("application/json"),
            body.as_bytes().to_vec(),
        )
        .await
    }

    /// Make a PUT request with JSON body and a bearer token
    pub async fn put_auth(&self, path: &str, token: &str, body: &str) -> (StatusCode, String) {
        self.request(
            "PUT",
            path,
            Some(token),
            Some("application/json"),
            body.as_bytes().to_vec(),
        )
        .await
    }

    /// Make a DELETE request with a bearer token
    pub async fn delete_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        self.request("DELETE", path, Some(token), None, Vec::new())
            .await
    }

    /// Make a multipart POST carrying a `product` JSON part and an
    /// optional `imageFile` part
    pub async fn post_multipart(
        &self,
        path: &str,
        token: &str,
        product_json: Option<&str>,
        image: Option<(&str, &[u8])>,
    ) -> (StatusCode, String) {
        let body = multipart_body(product_json, image);
        self.request(
            "POST",
            path,
            Some(token),
            Some(&format!("multipart/form-data; boundary={}", BOUNDARY)),
            body,
        )
        .await
    }

    /// Make a multipart PUT (product update)
    pub async fn put_multipart(
        &self,
        path: &str,
        token: &str,
        product_json: Option<&str>,
        image: Option<(&str, &[u8])>,
    ) -> (StatusCode, String) {
        let body = multipart_body(product_json, image);
        self.request(
            "PUT",
            path,
            Some(token),
            Some(&format!("multipart/form-data; boundary={}", BOUNDARY)),
            body,
        )
        .await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }

        let request = builder.body(Body::from(body)).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Clean up test data
    pub async fn cleanup(&self) {
        // Truncate all tables for clean state between tests
        sqlx::query("TRUNCATE users, products, orders, order_items, reviews CASCADE")
            .execute(&self.pool)
            .await
            .expect("Failed to truncate tables");
    }
}

/// Build a multipart body from the optional product and image parts
fn multipart_body(product_json: Option<&str>, image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();

    if let Some(json) = product_json {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"product\"\r\n\
                 Content-Type: application/json\r\n\r\n{}\r\n",
                BOUNDARY, json
            )
            .as_bytes(),
        );
    }

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"imageFile\"; filename=\"{}\"\r\n\
                 Content-Type: image/png\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Test configuration; TEST_DATABASE_URL overrides the default database
fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    if let Ok(url) = std::env::var("TEST_DATABASE_URL") {
        config.database.url = url;
    }
    // Keep the suite fast; production cost is higher
    config.auth.bcrypt_cost = 4;
    config
}

async fn create_test_pool(url: &str) -> PgPool {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(url)
        .await
        .expect("Failed to connect to test database")
}

/// Register an account and log in, returning the bearer token
pub async fn signup_and_login(
    app: &TestApp,
    email: &str,
    password: &str,
    admin_code: Option<&str>,
) -> String {
    let signup = serde_json::json!({
        "email": email,
        "password": password,
        "name": "Test User",
        "admin_code": admin_code,
    });
    let (status, body) = app
        .post("/api/v1/auth/signup", &signup.to_string())
        .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

    let login = serde_json::json!({ "email": email, "password": password });
    let (status, body) = app.post("/api/v1/auth/login", &login.to_string()).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    response["token"].as_str().unwrap().to_string()
}
