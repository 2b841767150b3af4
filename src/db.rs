use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};

use crate::error::AppResult;

const MIGRATION_001: &str = include_str!("../migrations/001_activity_log.sql");

/// The catalog is an external read-only store; connect but never migrate it.
pub async fn connect_catalog(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await.map_err(anyhow::Error::new)?;
    tune_sqlite(&db).await?;
    Ok(db)
}

/// The activity log store is owned by this app: connect once at startup
/// and bring its schema up to date.
pub async fn connect_activity_log(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await.map_err(anyhow::Error::new)?;
    tune_sqlite(&db).await?;
    run_sql(&db, MIGRATION_001).await?;
    Ok(db)
}

async fn tune_sqlite(db: &DatabaseConnection) -> AppResult<()> {
    if db.get_database_backend() != DbBackend::Sqlite {
        return Ok(());
    }
    for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
            .await
            .map_err(anyhow::Error::new)?;
    }
    Ok(())
}

pub(crate) async fn run_sql(db: &DatabaseConnection, sql: &str) -> AppResult<()> {
    for stmt in sql.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        db.execute(Statement::from_string(db.get_database_backend(), stmt.to_string()))
            .await
            .map_err(anyhow::Error::new)?;
    }
    Ok(())
}
