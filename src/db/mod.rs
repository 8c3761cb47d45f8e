//! Database module for users, collections and saved exhibits.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - User registration and lookup
//! - Collection CRUD, scoped to the owning user
//! - Saving exhibits into collections (idempotent)
//!
//! # Example
//!
//! ```ignore
//! use curator::db::{init_db, list_collections};
//!
//! let pool = init_db("sqlite:curator.db").await?;
//! let collections = list_collections(&pool, user_id).await?;
//! ```

use serde::Serialize;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "curator.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file (and its directory) if it doesn't exist,
/// establishes a connection pool with up to 5 connections, and runs all
/// pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = db_url
        .strip_prefix("sqlite:")
        .map(std::path::Path::new)
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }

    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Whether an error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ============================================================================
// Users
// ============================================================================

/// A registered user, including the stored password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The public face of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Insert a new user.
///
/// Fails with a unique violation (see [`is_unique_violation`]) when the
/// username or email is taken.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> sqlx::Result<UserProfile> {
    sqlx::query_as::<_, UserProfile>(
        "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)
         RETURNING id, username, email",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

// ============================================================================
// Collections
// ============================================================================

/// A user-curated collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Collection {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

pub async fn create_collection(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> sqlx::Result<Collection> {
    sqlx::query_as::<_, Collection>(
        "INSERT INTO collections (user_id, name, description) VALUES (?, ?, ?)
         RETURNING id, user_id, name, description, created_at",
    )
    .bind(user_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// All collections owned by a user, oldest first.
pub async fn list_collections(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<Collection>> {
    sqlx::query_as::<_, Collection>(
        "SELECT id, user_id, name, description, created_at
         FROM collections WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// A collection, only if `user_id` owns it.
pub async fn find_owned_collection(
    pool: &SqlitePool,
    collection_id: i64,
    user_id: i64,
) -> sqlx::Result<Option<Collection>> {
    sqlx::query_as::<_, Collection>(
        "SELECT id, user_id, name, description, created_at
         FROM collections WHERE id = ? AND user_id = ?",
    )
    .bind(collection_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

// ============================================================================
// Saved exhibits
// ============================================================================

/// One exhibit/collection link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CollectionExhibit {
    pub id: i64,
    pub collection_id: i64,
    pub exhibit_id: String,
    pub saved_at: String,
}

/// An exhibit as listed inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SavedExhibit {
    pub id: String,
    pub title: String,
    pub institution: String,
    pub saved_at: String,
}

/// Result of [`save_exhibit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(CollectionExhibit),
    AlreadyPresent,
}

/// Record an exhibit (first writer's title wins) and link it to a collection.
///
/// Linking the same exhibit twice is not an error.
pub async fn save_exhibit(
    pool: &SqlitePool,
    collection_id: i64,
    exhibit_id: &str,
    title: &str,
    institution: &str,
    user_id: i64,
) -> sqlx::Result<SaveOutcome> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO exhibits (id, title, institution, user_id) VALUES (?, ?, ?, ?)
         ON CONFLICT(id) DO NOTHING",
    )
    .bind(exhibit_id)
    .bind(title)
    .bind(institution)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let link = sqlx::query_as::<_, CollectionExhibit>(
        "INSERT INTO collection_exhibits (collection_id, exhibit_id) VALUES (?, ?)
         ON CONFLICT(collection_id, exhibit_id) DO NOTHING
         RETURNING id, collection_id, exhibit_id, saved_at",
    )
    .bind(collection_id)
    .bind(exhibit_id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(match link {
        Some(link) => SaveOutcome::Saved(link),
        None => SaveOutcome::AlreadyPresent,
    })
}

/// Exhibits saved in a collection, in the order they were saved.
pub async fn list_collection_exhibits(
    pool: &SqlitePool,
    collection_id: i64,
) -> sqlx::Result<Vec<SavedExhibit>> {
    sqlx::query_as::<_, SavedExhibit>(
        r#"
        SELECT e.id, e.title, e.institution, ce.saved_at
        FROM collection_exhibits ce
        JOIN exhibits e ON e.id = ce.exhibit_id
        WHERE ce.collection_id = ?
        ORDER BY ce.id
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await
}

/// Unlink an exhibit from a collection. Returns whether a link existed.
pub async fn remove_exhibit(
    pool: &SqlitePool,
    collection_id: i64,
    exhibit_id: &str,
) -> sqlx::Result<bool> {
    let result =
        sqlx::query("DELETE FROM collection_exhibits WHERE collection_id = ? AND exhibit_id = ?")
            .bind(collection_id)
            .bind(exhibit_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
