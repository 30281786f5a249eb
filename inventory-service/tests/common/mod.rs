use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenLifetimes;
use chrono::Utc;
use inventory_service::domain::item::errors::ItemError;
use inventory_service::domain::item::models::Item;
use inventory_service::domain::item::models::ItemId;
use inventory_service::domain::item::models::NewItem;
use inventory_service::domain::item::ports::ItemRepository;
use inventory_service::domain::item::service::ItemService;
use inventory_service::domain::user::errors::UserError;
use inventory_service::domain::user::models::NewUser;
use inventory_service::domain::user::models::User;
use inventory_service::domain::user::models::UserId;
use inventory_service::domain::user::models::Username;
use inventory_service::domain::user::ports::UserRepository;
use inventory_service::domain::user::service::AuthService;
use inventory_service::inbound::http::router::create_router;
use inventory_service::outbound::InMemoryCacheStore;
use inventory_service::outbound::JwtTokenIssuer;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub cache_store: InMemoryCacheStore,
    pub item_repository: Arc<InMemoryItemRepository>,
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

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, TokenLifetimes::default()));
        let token_issuer = Arc::new(JwtTokenIssuer::new(authenticator));
        let user_repository = Arc::new(InMemoryUserRepository::default());
        let item_repository = Arc::new(InMemoryItemRepository::default());
        let cache_store = InMemoryCacheStore::new();

        let auth_service = Arc::new(AuthService::new(user_repository, token_issuer));
        let item_service = Arc::new(ItemService::new(
            Arc::clone(&item_repository),
            Arc::new(cache_store.clone()),
            std::time::Duration::from_secs(300),
        ));

        let router = create_router(item_service, auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            cache_store,
            item_repository,
        }
    }

    /// Sign up and log in, returning the login response body
    pub async fn signup_and_login(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/signup")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response.json().await.expect("Failed to parse response")
    }

    /// Sign up a fresh user and return its access token
    pub async fn access_token(&self) -> String {
        let tokens = self.signup_and_login("testuser", "testpassword").await;
        tokens["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
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

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

/// Item store keyed by an auto-incremented id, like a BIGSERIAL column
#[derive(Default)]
pub struct InMemoryItemRepository {
    state: Mutex<ItemTable>,
}

#[derive(Default)]
struct ItemTable {
    next_id: i64,
    rows: BTreeMap<i64, Item>,
}

impl InMemoryItemRepository {
    /// Write straight to the store, bypassing the service and its cache
    pub fn overwrite(&self, item: Item) {
        let mut table = self.state.lock().unwrap();
        table.rows.insert(item.id.0, item);
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: NewItem) -> Result<Item, ItemError> {
        let mut table = self.state.lock().unwrap();
        table.next_id += 1;
        let item = item.with_id(ItemId(table.next_id));
        table.rows.insert(item.id.0, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError> {
        Ok(self.state.lock().unwrap().rows.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        Ok(self.state.lock().unwrap().rows.values().cloned().collect())
    }

    async fn update(&self, item: Item) -> Result<Item, ItemError> {
        let mut table = self.state.lock().unwrap();
        match table.rows.get_mut(&item.id.0) {
            Some(row) => {
                *row = item.clone();
                Ok(item)
            }
            None => Err(ItemError::NotFound(item.id)),
        }
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ItemError> {
        let mut table = self.state.lock().unwrap();
        table
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(ItemError::NotFound(*id))
    }
}

/// User store enforcing username uniqueness
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            username: user.username,
            password_hash: user.password_hash,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }
}
