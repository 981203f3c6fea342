use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};

use blog_server::config::{AppConfig, CorsConfig, DatabaseConfig, LogConfig, ServerConfig};
use blog_server::state::AppState;

/// In-memory SQLite; the pool is pinned to one connection so every query
/// sees the same database.
const TEST_DB_URL: &str = "sqlite::memory:";

pub mod routes {
    pub const AUTHORS: &str = "/authors";
    pub const BLOGS: &str = "/blogs";
    pub const COMMENTS: &str = "/comments";
    pub const USERS: &str = "/users";

    pub fn author(id: &str) -> String {
        format!("/authors/{id}")
    }

    pub fn blog(id: &str) -> String {
        format!("/blogs/{id}")
    }

    pub fn comment(id: &str) -> String {
        format!("/comments/{id}")
    }

    pub fn user(id: &str) -> String {
        format!("/users/{id}")
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut opts = ConnectOptions::new(TEST_DB_URL);
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        blog_server::database::sync_schema(&db)
            .await
            .expect("Failed to create schema");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: TEST_DB_URL.to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_secs: 8,
            },
            log: LogConfig {
                filter: "warn".to_string(),
            },
        };

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };

        let app = blog_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create an author via the API and return its `id`.
    pub async fn create_author(&self, full_name: &str) -> String {
        let res = self
            .post(
                routes::AUTHORS,
                &json!({
                    "full_name": full_name,
                    "email": "author@example.com",
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_author failed: {}", res.text);
        res.id()
    }

    /// Create a user via the API and return its `id`.
    pub async fn create_user(&self, full_name: &str) -> String {
        let res = self
            .post(
                routes::USERS,
                &json!({
                    "full_name": full_name,
                    "email": "user@example.com",
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_user failed: {}", res.text);
        res.id()
    }

    /// Create a blog for `author_id` via the API and return its `id`.
    pub async fn create_blog(&self, author_id: &str, title: &str) -> String {
        let res = self
            .post(
                routes::BLOGS,
                &json!({
                    "title": title,
                    "content": "Some content",
                    "author": author_id,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_blog failed: {}", res.text);
        res.id()
    }

    /// Create a comment by `user_id` on `blog_id` via the API and return its `id`.
    pub async fn create_comment(&self, blog_id: &str, user_id: &str) -> String {
        let res = self
            .post(
                routes::COMMENTS,
                &json!({
                    "blog": blog_id,
                    "content": "Nice post",
                    "user": user_id,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_comment failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .expect("response body should contain 'id'")
            .to_string()
    }

    /// The string ids held in an array field such as `blogs` or `comments`.
    pub fn ids(&self, field: &str) -> Vec<String> {
        self.body[field]
            .as_array()
            .unwrap_or_else(|| panic!("response body should contain array '{field}'"))
            .iter()
            .map(|v| v.as_str().expect("ids are strings").to_string())
            .collect()
    }
}

/// A well-formed id that no record has.
pub fn unknown_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
