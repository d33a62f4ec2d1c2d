use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Set,
};
use serde_json::{Value, json};

use bloglist_server::config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
use bloglist_server::entity::{blog, user};
use bloglist_server::state::AppState;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";

pub mod routes {
    pub const BLOGS: &str = "/api/blogs";
    pub const USERS: &str = "/api/users";
    pub const LOGIN: &str = "/api/login";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn blog(id: impl std::fmt::Display) -> String {
        format!("/api/blogs/{id}")
    }
}

/// A running test server backed by its own in-memory SQLite database.
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
        // One connection keeps every query on the same in-memory database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        bloglist_server::database::create_tables(&db)
            .await
            .expect("Failed to create tables");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
                token_ttl_secs: 3600,
            },
        };

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };

        let app = bloglist_server::build_router(state);

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

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        self.post_with_authorization(path, body, &format!("Bearer {token}"))
            .await
    }

    /// POST with a raw `Authorization` header value, for scheme tests.
    pub async fn post_with_authorization(
        &self,
        path: &str,
        body: &Value,
        authorization: &str,
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", authorization)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Register a user via the API and return its `id`.
    pub async fn create_user(&self, username: &str, name: &str, password: &str) -> i32 {
        let res = self
            .post_without_token(
                routes::USERS,
                &json!({"username": username, "name": name, "password": password}),
            )
            .await;
        assert_eq!(res.status, 201, "create_user failed: {}", res.text);
        res.id()
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let res = self
            .post_without_token(
                routes::LOGIN,
                &json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["token"]
            .as_str()
            .expect("Login response should contain a token")
            .to_string()
    }

    /// Register a user and log in, returning the auth token.
    pub async fn create_authenticated_user(&self, username: &str, password: &str) -> String {
        self.create_user(username, "Test User", password).await;
        self.login(username, password).await
    }

    /// Create a blog via the API and return its `id`.
    pub async fn create_blog(&self, token: &str, title: &str, likes: i32) -> i32 {
        let res = self
            .post_with_token(
                routes::BLOGS,
                &json!({
                    "title": title,
                    "author": "Edsger W. Dijkstra",
                    "url": "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
                    "likes": likes,
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_blog failed: {}", res.text);
        res.id()
    }

    /// Insert a blog with no owner directly into the DB and return its `id`.
    pub async fn seed_blog_without_owner(&self, title: &str) -> i32 {
        blog::ActiveModel {
            title: Set(title.to_string()),
            author: Set("Robert C. Martin".to_string()),
            url: Set("http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll".to_string()),
            likes: Set(0),
            user_id: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert blog")
        .id
    }

    /// An id that is well-formed but refers to a blog that has since been deleted.
    pub async fn non_existing_id(&self, token: &str) -> i32 {
        let id = self.create_blog(token, "willremovethissoon", 0).await;
        let res = self.delete_with_token(&routes::blog(id), token).await;
        assert_eq!(res.status, 204, "cleanup delete failed: {}", res.text);
        id
    }

    pub async fn blog_count(&self) -> u64 {
        blog::Entity::find()
            .count(&self.db)
            .await
            .expect("DB count failed")
    }

    pub async fn user_count(&self) -> u64 {
        user::Entity::find()
            .count(&self.db)
            .await
            .expect("DB count failed")
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }
}
