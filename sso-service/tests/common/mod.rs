#![allow(dead_code)]

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use auth::generate_key_pair;
use auth::KeyPair;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use sso_service::domain::auth::models::App;
use sso_service::domain::auth::models::AppId;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::SqliteDirectory;
use sso_service::outbound::tokens::JwtTokenIssuer;

pub const TEST_APP_ID: i32 = 1;
pub const TOKEN_TTL_SECONDS: i64 = 3600;

pub type TestAuthService =
    AuthService<SqliteDirectory, SqliteDirectory, SqliteDirectory, JwtTokenIssuer>;

/// Key pair shared by every test; 2048-bit generation is slow.
pub fn key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| generate_key_pair(2048).expect("Failed to generate key pair"))
}

/// Test application wired exactly like the server binary, minus the network.
pub struct TestApp {
    pub grpc: AuthGrpcService<TestAuthService>,
    pub db: TestDb,
}

/// In-memory Account Directory with migrations applied.
pub struct TestDb {
    pub pool: SqlitePool,
    pub directory: Arc<SqliteDirectory>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_timeout(Duration::from_secs(10)).await
    }

    pub async fn spawn_with_timeout(operation_timeout: Duration) -> Self {
        let db = TestDb::new().await;
        db.provision_app(TEST_APP_ID, "Test").await;

        let service = Arc::new(AuthService::new(
            Arc::clone(&db.directory),
            Arc::clone(&db.directory),
            Arc::clone(&db.directory),
            Arc::new(JwtTokenIssuer::new()),
            chrono::Duration::seconds(TOKEN_TTL_SECONDS),
        ));

        Self {
            grpc: AuthGrpcService::new(service, operation_timeout),
            db,
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        // A single long-lived connection keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        let directory = Arc::new(SqliteDirectory::new(pool.clone()));
        directory.migrate().await.expect("Failed to run migrations");

        Self { pool, directory }
    }

    pub async fn provision_app(&self, id: i32, name: &str) -> App {
        let app = App {
            id: AppId(id),
            name: name.to_string(),
            private_key: key_pair().private_key.clone(),
            public_key: key_pair().public_key.clone(),
        };
        self.directory
            .upsert_app(&app)
            .await
            .expect("Failed to provision app");
        app
    }

    pub async fn count_users(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }

    pub async fn promote_to_admin(&self, user_id: i64) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("Failed to promote user");
    }
}
