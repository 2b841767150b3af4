//! Shared fixtures for the store adapter and orchestrator tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};

use crate::{
    activity::ActivityLog,
    catalog::CatalogStore,
    entities::{category, film, film_category},
};

pub(crate) const CATALOG_SCHEMA: &str = "
    CREATE TABLE film (
        film_id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        release_year INTEGER NOT NULL,
        rating TEXT,
        length INTEGER,
        rental_duration INTEGER NOT NULL,
        rental_rate REAL NOT NULL,
        replacement_cost REAL NOT NULL
    );
    CREATE TABLE category (
        category_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE film_category (
        film_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        PRIMARY KEY (film_id, category_id)
    )";

/// A single-connection in-memory SQLite database. One connection keeps
/// every query on the same memory store.
pub(crate) async fn mem_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    Database::connect(opt).await.unwrap()
}

pub(crate) async fn empty_catalog(page_size: u64) -> CatalogStore {
    let db = mem_db().await;
    crate::db::run_sql(&db, CATALOG_SCHEMA).await.unwrap();
    CatalogStore::new(db, page_size)
}

/// A catalog connection without any schema; every query fails the way an
/// unreachable store does.
pub(crate) async fn broken_catalog(page_size: u64) -> CatalogStore {
    CatalogStore::new(mem_db().await, page_size)
}

/// Catalog with films "Alien Wave" (2001, Action), "Alien Shore" (1999,
/// Drama), "Blue Alien" (2010, Drama) and "Solaris" (2002, Drama).
pub(crate) async fn seeded_catalog(page_size: u64) -> CatalogStore {
    let store = empty_catalog(page_size).await;
    let db = store.db();

    for (id, title, year) in [
        (1, "Alien Wave", 2001),
        (2, "Alien Shore", 1999),
        (3, "Blue Alien", 2010),
        (4, "Solaris", 2002),
    ] {
        let row = film::ActiveModel {
            film_id: Set(id),
            title: Set(title.to_string()),
            description: Set(None),
            release_year: Set(year),
            rating: Set(Some("PG".to_string())),
            length: Set(Some(90)),
            rental_duration: Set(3),
            rental_rate: Set(2.99),
            replacement_cost: Set(19.99),
        };
        film::Entity::insert(row).exec(db).await.unwrap();
    }

    for (id, name) in [(1, "Action"), (2, "Drama")] {
        category::Entity::insert(category::ActiveModel {
            category_id: Set(id),
            name: Set(name.to_string()),
        })
        .exec(db)
        .await
        .unwrap();
    }

    for (film_id, category_id) in [(1, 1), (2, 2), (3, 2), (4, 2)] {
        film_category::Entity::insert(film_category::ActiveModel {
            film_id: Set(film_id),
            category_id: Set(category_id),
        })
        .exec(db)
        .await
        .unwrap();
    }

    store
}

/// An activity log over a migrated in-memory store, plus the raw handle
/// for direct seeding and fault injection.
pub(crate) async fn activity_log() -> (ActivityLog, DatabaseConnection) {
    let db = mem_db().await;
    crate::db::run_sql(&db, include_str!("../migrations/001_activity_log.sql"))
        .await
        .unwrap();
    (ActivityLog::new(db.clone()), db)
}
