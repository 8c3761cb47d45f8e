//! Test utilities and fixtures for curator tests.
//!
//! This module provides common test helpers, mock factories, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use curator::test_utils::{temp_db, mock_exhibit};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let exhibit = mock_exhibit("harvard-1");
//!     // ... test logic
//! }
//! ```

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::exhibits::domain::{Exhibit, HistoricalEra, Institution};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
///
/// ```ignore
/// let (pool, _dir) = temp_db().await;
/// // Database is deleted when _dir goes out of scope
/// ```
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a mock Exhibit with an image and sensible defaults.
///
/// The institution is taken from the id prefix (Harvard if unrecognised).
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = Exhibit {
///     title: "Custom".to_string(),
///     ..mock_exhibit("harvard-1")
/// };
/// ```
pub fn mock_exhibit(id: &str) -> Exhibit {
    let institution = id
        .split_once('-')
        .and_then(|(tag, _)| Institution::from_tag(tag))
        .unwrap_or(Institution::Harvard);

    Exhibit {
        id: id.to_string(),
        title: format!("Exhibit {}", id),
        creator: "Test Artist".to_string(),
        date: "1900".to_string(),
        year_created: Some(1900),
        description: "A test exhibit".to_string(),
        image_url: format!("https://images.test/{}.jpg", id),
        institution,
        collection: "Paintings".to_string(),
        country_of_origin: "Dutch".to_string(),
        medium: "Oil on canvas".to_string(),
        style_or_period: "Modern".to_string(),
        subject_matter: vec!["Landscape".to_string()],
        location_created: "Amsterdam".to_string(),
        historical_era: HistoricalEra::Modern,
    }
}

/// Creates a mock Exhibit for an institution and native id.
pub fn mock_exhibit_for(institution: Institution, native_id: &str) -> Exhibit {
    Exhibit {
        institution,
        ..mock_exhibit(&institution.composite_id(native_id))
    }
}

/// Inserts a user with a placeholder password hash and returns its ID.
pub async fn insert_mock_user(pool: &SqlitePool, username: &str) -> i64 {
    crate::db::create_user(pool, username, &format!("{}@example.com", username), "x")
        .await
        .expect("Failed to insert user")
        .id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let collections = crate::db::list_collections(&pool, 1).await.unwrap();
        assert!(collections.is_empty());
    }

    #[tokio::test]
    async fn test_insert_mock_user() {
        let (pool, _dir) = temp_db().await;

        let id = insert_mock_user(&pool, "ada").await;
        assert!(id > 0);

        let user = crate::db::find_user_by_email(&pool, "ada@example.com")
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.id), Some(id));
    }

    #[test]
    fn test_mock_exhibit_defaults() {
        let exhibit = mock_exhibit("smithsonian-abc");
        assert_eq!(exhibit.institution, Institution::Smithsonian);
        assert!(exhibit.has_image());
    }

    #[test]
    fn test_mock_exhibit_for() {
        let exhibit = mock_exhibit_for(Institution::Harvard, "42");
        assert_eq!(exhibit.id, "harvard-42");
        assert_eq!(exhibit.institution, Institution::Harvard);
    }
}
