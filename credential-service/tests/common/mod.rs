use std::sync::Arc;

use auth::Authenticator;
use auth::KeyMaterial;
use auth::TokenVerifier;
use credential_service::domain::user::policy::UsernamePolicy;
use credential_service::domain::user::service::UserService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryUserRepository;

pub const PRIVATE_PEM: &str = include_str!("../../../fixtures/rsa_private.pem");
pub const PUBLIC_PEM: &str = include_str!("../../../fixtures/rsa_public.pem");

pub const TOKEN_LIFETIME: i64 = 3600;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_verifier: TokenVerifier,
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

        let keys = KeyMaterial::from_pem(PRIVATE_PEM, PUBLIC_PEM);
        let authenticator =
            Arc::new(Authenticator::new(&keys).expect("Failed to create authenticator"));

        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            authenticator,
            UsernamePolicy::default(),
            TOKEN_LIFETIME,
        ));

        let router = create_router(user_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_verifier: TokenVerifier::new(PUBLIC_PEM).expect("Failed to create verifier"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(&format!("{}{}", self.address, path))
    }

    /// Register a user and assert it succeeded
    pub async fn register(&self, name: &str, password: &str) {
        let response = self
            .post(&format!("/user/{}", name))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }
}
