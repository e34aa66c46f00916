use std::sync::Arc;

use auth::TokenCodec;
use axum::extract::Request;
use axum::middleware;
use axum::middleware::Next;
use identity_service::domain::account::service::AuthService;
use identity_service::inbound::http::middleware::AuthenticatedAccount;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::store::InMemoryAccountStore;
use serde_json::json;

pub const TEST_TOKEN_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-32-bytes";
pub const TEST_TOKEN_VALIDITY_MS: i64 = 60_000;

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application with the default token validity window
    pub async fn spawn() -> Self {
        Self::spawn_inner(TEST_TOKEN_VALIDITY_MS, None).await
    }

    /// Spawn the application with a custom token validity window
    pub async fn spawn_with_validity(validity_ms: i64) -> Self {
        Self::spawn_inner(validity_ms, None).await
    }

    /// Spawn the application with an identity pre-seeded into every request,
    /// ahead of the resolver (simulates a prior filter in the chain)
    pub async fn spawn_with_preseeded_identity(identity: AuthenticatedAccount) -> Self {
        Self::spawn_inner(TEST_TOKEN_VALIDITY_MS, Some(identity)).await
    }

    async fn spawn_inner(validity_ms: i64, preseeded: Option<AuthenticatedAccount>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_codec = Arc::new(TokenCodec::new(TEST_TOKEN_SECRET, validity_ms));
        let store = Arc::new(InMemoryAccountStore::new());
        let auth_service = Arc::new(AuthService::new(store, Arc::clone(&token_codec)));

        let mut router = create_router(auth_service, Arc::clone(&token_codec));

        if let Some(identity) = preseeded {
            router = router.layer(middleware::from_fn(move |mut req: Request, next: Next| {
                let identity = identity.clone();
                async move {
                    req.extensions_mut().insert(identity);
                    next.run(req).await
                }
            }));
        }

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account and return the response
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email_address": format!("{}@example.com", username),
                "display_name": "Test User",
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute register request")
    }

    /// Log in and return the response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login request")
    }
}

/// Extract the token out of a register/login response body
pub async fn token_from_response(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Response body is not JSON");
    body["data"]["token"]
        .as_str()
        .expect("Response has no token")
        .to_string()
}
