#![allow(dead_code)]

use std::sync::Arc;

use auth::AuthConfig;
use auth::Authenticator;
use auth::TokenService;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig::new(TEST_SECRET, Duration::hours(24))
}

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(Authenticator::new(test_auth_config()));

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
        let auth_service = Arc::new(AuthService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(user_service, auth_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_service: TokenService::new(test_auth_config()),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning `(user_id, token)`
    pub async fn register_and_login(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> (i64, String) {
        let response = self.register(name, email, password).await;
        assert!(response.status().is_success(), "registration failed");

        let body: Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        let user_id = body["data"]["user"]["id"].as_i64().expect("missing user id");
        let token = body["data"]["token"]
            .as_str()
            .expect("missing token")
            .to_string();

        (user_id, token)
    }
}
