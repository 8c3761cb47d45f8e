//! Demo data command.

use anyhow::Context;
use sqlx::SqlitePool;
use std::path::Path;
use tokio::runtime::Runtime;
use tracing::info;

use crate::auth;
use crate::config::Config;
use crate::db::{self, SaveOutcome};

/// Password given to every demo account
pub const DEMO_PASSWORD: &str = "password123";

const DEMO_USERS: &[(&str, &str)] = &[
    ("johndoe", "john@example.com"),
    ("janedoe", "jane@example.com"),
];

const DEMO_COLLECTIONS: &[(&str, &str)] = &[
    ("Favorites", "A collection of favorite exhibits"),
    ("To Explore", "Exhibits I want to check out"),
];

const DEMO_EXHIBITS: &[(&str, &str, &str)] = &[
    ("harvard-001", "Mona Lisa", "Harvard Art Museums"),
    ("smithsonian-001", "The Starry Night", "Smithsonian"),
];

/// Counts of rows created by a seeding run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub collections: usize,
    pub exhibits: usize,
}

/// Populate the database with demo accounts
pub fn cmd_seed(rt: &Runtime, config: &Config, db_path: Option<&Path>) -> anyhow::Result<()> {
    rt.block_on(async {
        let db_url = match db_path {
            Some(path) => db::db_url(Some(path)),
            None => config.database.url(),
        };
        let pool = db::init_db(&db_url)
            .await
            .with_context(|| format!("Failed to open database {}", db_url))?;

        let password_hash =
            tokio::task::spawn_blocking(|| auth::hash_password(DEMO_PASSWORD)).await?;
        let summary = seed_demo(&pool, &password_hash).await?;

        if summary == SeedSummary::default() {
            println!("Demo data already present in {}", db_url);
        } else {
            println!(
                "Seeded {} users, {} collections, {} exhibits into {}",
                summary.users, summary.collections, summary.exhibits, db_url
            );
            println!("Log in as {} with password {:?}", DEMO_USERS[0].1, DEMO_PASSWORD);
        }
        Ok(())
    })
}

/// Insert the demo users; the first one owns the demo collections and exhibits.
///
/// Users that already exist are left untouched, so seeding twice is a no-op.
pub async fn seed_demo(pool: &SqlitePool, password_hash: &str) -> sqlx::Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    let mut owner = None;

    for (username, email) in DEMO_USERS {
        match db::create_user(pool, username, email, password_hash).await {
            Ok(profile) => {
                info!(user_id = profile.id, username, "Seeded user");
                summary.users += 1;
                owner = owner.or(Some(profile.id));
            }
            Err(e) if db::is_unique_violation(&e) => {}
            Err(e) => return Err(e),
        }
    }

    // Only a fresh owner gets collections
    let Some(owner) = owner.filter(|_| summary.users == DEMO_USERS.len()) else {
        return Ok(summary);
    };

    let mut favorites = None;
    for (name, description) in DEMO_COLLECTIONS {
        let collection = db::create_collection(pool, owner, name, Some(*description)).await?;
        summary.collections += 1;
        favorites = favorites.or(Some(collection.id));
    }

    if let Some(favorites) = favorites {
        for (id, title, institution) in DEMO_EXHIBITS {
            if let SaveOutcome::Saved(_) =
                db::save_exhibit(pool, favorites, id, title, institution, owner).await?
            {
                summary.exhibits += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_db;

    #[tokio::test]
    async fn test_seed_creates_demo_data() {
        let (pool, _dir) = temp_db().await;

        let summary = seed_demo(&pool, "hash").await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                users: 2,
                collections: 2,
                exhibits: 2
            }
        );

        let john = db::find_user_by_email(&pool, "john@example.com")
            .await
            .unwrap()
            .unwrap();
        let collections = db::list_collections(&pool, john.id).await.unwrap();
        assert_eq!(collections.len(), 2);

        let favorites = collections.iter().find(|c| c.name == "Favorites").unwrap();
        let saved = db::list_collection_exhibits(&pool, favorites.id).await.unwrap();
        let ids: Vec<_> = saved.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["harvard-001", "smithsonian-001"]);
    }

    #[tokio::test]
    async fn test_seed_twice_is_noop() {
        let (pool, _dir) = temp_db().await;

        seed_demo(&pool, "hash").await.unwrap();
        let second = seed_demo(&pool, "hash").await.unwrap();

        assert_eq!(second, SeedSummary::default());
    }
}
