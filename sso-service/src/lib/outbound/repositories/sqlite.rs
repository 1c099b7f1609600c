use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// SQLite-backed Account Directory holding users and apps.
pub struct SqliteDirectory {
    pool: SqlitePool,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a connection pool for the given `sqlite://` URL.
    ///
    /// The database file is created if missing, runs in WAL mode, waits up to
    /// five seconds on a locked database and enforces foreign keys.
    pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
    }

    /// Apply embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Insert an app or replace the name and keys of an existing one.
    ///
    /// Provisioning operation; the authentication flow never writes apps.
    pub async fn upsert_app(&self, app: &App) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO apps (id, name, private_key, public_key)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                private_key = excluded.private_key,
                public_key = excluded.public_key
            "#,
        )
        .bind(app.id.0)
        .bind(&app.name)
        .bind(&app.private_key)
        .bind(&app.public_key)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserSaver for SqliteDirectory {
    async fn save_user(
        &self,
        email: &str,
        password_hash: &[u8],
        password_salt: &[u8],
    ) -> Result<UserId, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, password_salt)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(password_salt)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserExists(email.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(UserId(result.last_insert_rowid()))
    }
}

#[async_trait]
impl UserProvider for SqliteDirectory {
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, password_salt, is_admin
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => user_from_row(&r).map_err(database_error),
            None => Err(StorageError::UserNotFound(email.to_string())),
        }
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => r.try_get("is_admin").map_err(database_error),
            None => Err(StorageError::UserNotFound(user_id.to_string())),
        }
    }
}

#[async_trait]
impl AppProvider for SqliteDirectory {
    async fn find_app_by_id(&self, app_id: AppId) -> Result<App, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, private_key, public_key
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => app_from_row(&r).map_err(database_error),
            None => Err(StorageError::AppNotFound(app_id.0)),
        }
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId(row.try_get("id")?),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        password_salt: row.try_get("password_salt")?,
        is_admin: row.try_get("is_admin")?,
    })
}

fn app_from_row(row: &SqliteRow) -> Result<App, sqlx::Error> {
    Ok(App {
        id: AppId(row.try_get("id")?),
        name: row.try_get("name")?,
        private_key: row.try_get("private_key")?,
        public_key: row.try_get("public_key")?,
    })
}

fn database_error(e: sqlx::Error) -> StorageError {
    match e {
        sqlx::Error::PoolTimedOut => StorageError::DeadlineExceeded,
        other => StorageError::Database(other.to_string()),
    }
}
