//! Schema creation and additive column migrations.
//!
//! The `analyses` table started life with only the base columns; later
//! variants added `document_type` and `metrics`. Opening the store against a
//! database created before those columns existed must succeed, so migration
//! is an explicit, idempotent, ordered list of `ALTER TABLE … ADD COLUMN`
//! steps applied when the column is missing. Migration is one-directional:
//! no column is ever removed or renamed.

use anyhow::Result;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::config::Config;
use crate::db;

/// Additive migrations, applied in order at startup.
const COLUMN_MIGRATIONS: &[(&str, &str)] = &[
    (
        "document_type",
        "ALTER TABLE analyses ADD COLUMN document_type TEXT NOT NULL DEFAULT 'general'",
    ),
    ("metrics", "ALTER TABLE analyses ADD COLUMN metrics TEXT"),
];

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate_pool(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Creates the base table if absent, then applies the additive column list.
/// Safe to run any number of times.
pub async fn migrate_pool(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identifier TEXT NOT NULL,
            source_text TEXT NOT NULL,
            analysis_text TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    for (column, ddl) in COLUMN_MIGRATIONS {
        if !has_column(pool, "analyses", column).await? {
            debug!(column, "adding missing column");
            sqlx::query(ddl).execute(pool).await?;
        }
    }

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_analyses_identifier_created \
         ON analyses(identifier, created_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn has_column(pool: &SqlitePool, table: &str, column: &str) -> Result<bool> {
    let rows = sqlx::query("SELECT name FROM pragma_table_info(?)")
        .bind(table)
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().any(|row| row.get::<String, _>("name") == column))
}
