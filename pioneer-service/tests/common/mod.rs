use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use pioneer_service::config::DirectoryConfig;
use pioneer_service::domain::directory::service::DirectoryService;
use pioneer_service::domain::user::models::User;
use pioneer_service::domain::user::models::Username;
use pioneer_service::domain::user::ports::UserRepository;
use pioneer_service::domain::user::service::UserService;
use pioneer_service::inbound::http::router::create_router;
use pioneer_service::outbound::directory::HttpDirectoryClient;
use pioneer_service::user::errors::UserError;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// User store kept in memory for the lifetime of one test
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        users.insert(user.username.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(username.as_str()).cloned())
    }
}

/// User store whose backend is unreachable
pub struct UnavailableUserRepository;

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn create(&self, _user: User) -> Result<User, UserError> {
        Err(UserError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_username(&self, _username: &Username) -> Result<Option<User>, UserError> {
        Err(UserError::DatabaseError("connection refused".to_string()))
    }
}

fn directory_entry(api: &str, category: &str) -> serde_json::Value {
    json!({
        "API": api,
        "Description": format!("{} API", api),
        "Auth": "",
        "HTTPS": true,
        "Cors": "unknown",
        "Link": format!("https://example.com/{}", api.to_lowercase()),
        "Category": category,
    })
}

pub fn animal_entries() -> Vec<serde_json::Value> {
    vec![
        directory_entry("Cats", "Animals"),
        directory_entry("Dogs", "Animals"),
        directory_entry("Axolotl", "Animals"),
    ]
}

pub fn all_entries() -> Vec<serde_json::Value> {
    let mut entries = animal_entries();
    entries.push(directory_entry("Open Library", "Books"));
    entries.push(directory_entry("Weather", "Weather"));
    entries
}

/// Stand-in for the public directory API, keyed on the `category` parameter
async fn stub_entries(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let category = params.get("category").map(String::as_str).unwrap_or("");

    match category {
        "" => (
            StatusCode::OK,
            Json(json!({ "count": 5, "entries": all_entries() })),
        ),
        "Animals" => (
            StatusCode::OK,
            Json(json!({ "count": 3, "entries": animal_entries() })),
        ),
        "Broken" => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "upstream exploded" })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({ "count": 0, "entries": null })),
        ),
    }
}

async fn spawn_stub_directory() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let router = Router::new().route("/entries", get(stub_entries));
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub directory error");
    });

    format!("http://127.0.0.1:{}", port)
}

impl TestApp {
    /// Spawn the application with an empty in-memory user store
    pub async fn spawn() -> Self {
        Self::spawn_with_repository(InMemoryUserRepository::default()).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_repository<UR: UserRepository>(repository: UR) -> Self {
        let directory_url = spawn_stub_directory().await;
        Self::spawn_with(repository, directory_url).await
    }

    /// Spawn the application against an upstream directory nobody listens on
    pub async fn spawn_with_unreachable_directory() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        Self::spawn_with(
            InMemoryUserRepository::default(),
            format!("http://127.0.0.1:{}", port),
        )
        .await
    }

    async fn spawn_with<UR: UserRepository>(repository: UR, directory_url: String) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_service = Arc::new(UserService::new(Arc::new(repository)));

        let directory_client = HttpDirectoryClient::new(&DirectoryConfig {
            base_url: directory_url,
            timeout_secs: 2,
        })
        .expect("Failed to create directory client");
        let directory_service = Arc::new(DirectoryService::new(Arc::new(directory_client)));

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let router = create_router(user_service, directory_service, authenticator, None);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
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

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user, asserting success
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .post("/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().unwrap().to_string()
    }
}
