//! Append-only persistence of completed analyses.
//!
//! The store exclusively owns record lifetime: `save` appends, nothing ever
//! mutates or deletes a row, and retrieval is by exact identifier match in
//! reverse-chronological order.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::{AnalysisRecord, DocumentType, NewAnalysis};

const SELECT_COLUMNS: &str =
    "SELECT id, identifier, document_type, source_text, analysis_text, metrics, created_at \
     FROM analyses";

/// Appends a new record and returns its assigned id. Never mutates an
/// existing row.
pub async fn save(pool: &SqlitePool, analysis: &NewAnalysis) -> Result<i64, AppError> {
    let metrics_json = match &analysis.metrics {
        Some(metrics) => Some(
            serde_json::to_string(metrics).map_err(|e| AppError::Persistence(e.to_string()))?,
        ),
        None => None,
    };
    let created_at = Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO analyses \
         (identifier, document_type, source_text, analysis_text, metrics, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&analysis.identifier)
    .bind(analysis.document_type.as_str())
    .bind(&analysis.source_text)
    .bind(&analysis.analysis_text)
    .bind(&metrics_json)
    .bind(created_at)
    .execute(pool)
    .await
    .map_err(|e| AppError::Persistence(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Returns all records whose identifier exactly matches (case-sensitive),
/// newest first. `type_filter` narrows to one document type; `None` (the
/// CLI "all" sentinel) returns everything. An unknown identifier yields an
/// empty sequence, not an error.
pub async fn find_by_identifier(
    pool: &SqlitePool,
    identifier: &str,
    type_filter: Option<DocumentType>,
) -> Result<Vec<AnalysisRecord>, AppError> {
    let rows = match type_filter {
        Some(document_type) => {
            sqlx::query(&format!(
                "{} WHERE identifier = ? AND document_type = ? ORDER BY created_at DESC, id DESC",
                SELECT_COLUMNS
            ))
            .bind(identifier)
            .bind(document_type.as_str())
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query(&format!(
                "{} WHERE identifier = ? ORDER BY created_at DESC, id DESC",
                SELECT_COLUMNS
            ))
            .bind(identifier)
            .fetch_all(pool)
            .await
        }
    }
    .map_err(|e| AppError::Persistence(e.to_string()))?;

    Ok(rows.iter().map(record_from_row).collect())
}

fn record_from_row(row: &SqliteRow) -> AnalysisRecord {
    let type_str: String = row.get("document_type");
    let metrics_json: Option<String> = row.get("metrics");
    AnalysisRecord {
        id: row.get("id"),
        identifier: row.get("identifier"),
        // Unrecognized stored values fall back to general.
        document_type: type_str.parse().unwrap_or(DocumentType::General),
        source_text: row.get("source_text"),
        analysis_text: row.get("analysis_text"),
        metrics: metrics_json.and_then(|json| serde_json::from_str(&json).ok()),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify;
    use crate::migrate::migrate_pool;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::collections::BTreeMap;
    use std::str::FromStr;

    async fn store_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let path = dir.path().join("parecer.sqlite");
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        migrate_pool(&pool).await.unwrap();
        pool
    }

    fn sample(identifier: &str, document_type: DocumentType) -> NewAnalysis {
        let mut metrics = BTreeMap::new();
        metrics.insert("clareza".to_string(), 4.2);
        metrics.insert("viabilidade".to_string(), 3.8);
        NewAnalysis {
            identifier: identifier.to_string(),
            document_type,
            source_text: "texto original".to_string(),
            analysis_text: "parecer completo".to_string(),
            metrics: Some(metrics),
        }
    }

    /// Insert directly with a controlled timestamp, bypassing `save`.
    async fn insert_at(pool: &SqlitePool, identifier: &str, ty: &str, created_at: i64) -> i64 {
        sqlx::query(
            "INSERT INTO analyses \
             (identifier, document_type, source_text, analysis_text, created_at) \
             VALUES (?, ?, 'src', 'out', ?)",
        )
        .bind(identifier)
        .bind(ty)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    #[tokio::test]
    async fn save_then_find_round_trips_all_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        let id = save(&pool, &sample("ana@example.com", DocumentType::Financial))
            .await
            .unwrap();

        let records = find_by_identifier(&pool, "ana@example.com", None)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, id);
        assert_eq!(record.identifier, "ana@example.com");
        assert_eq!(record.document_type, DocumentType::Financial);
        assert_eq!(record.source_text, "texto original");
        assert_eq!(record.analysis_text, "parecer completo");
        assert_eq!(record.metrics.as_ref().unwrap()["clareza"], 4.2);
        assert!(record.created_at > 0);
        pool.close().await;
    }

    #[tokio::test]
    async fn results_are_ordered_newest_first() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        let first = insert_at(&pool, "ana@example.com", "general", 100).await;
        let second = insert_at(&pool, "ana@example.com", "general", 300).await;
        let third = insert_at(&pool, "ana@example.com", "general", 200).await;

        let ids: Vec<i64> = find_by_identifier(&pool, "ana@example.com", None)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second, third, first]);
        pool.close().await;
    }

    #[tokio::test]
    async fn equal_timestamps_break_ties_by_insertion_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        let first = insert_at(&pool, "ana@example.com", "general", 100).await;
        let second = insert_at(&pool, "ana@example.com", "general", 100).await;

        let ids: Vec<i64> = find_by_identifier(&pool, "ana@example.com", None)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
        pool.close().await;
    }

    #[tokio::test]
    async fn type_filter_narrows_and_none_returns_all() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        insert_at(&pool, "ana@example.com", "resume", 100).await;
        insert_at(&pool, "ana@example.com", "financial", 200).await;
        insert_at(&pool, "ana@example.com", "resume", 300).await;

        let resumes = find_by_identifier(&pool, "ana@example.com", Some(DocumentType::Resume))
            .await
            .unwrap();
        assert_eq!(resumes.len(), 2);
        assert!(resumes
            .iter()
            .all(|r| r.document_type == DocumentType::Resume));

        let all = find_by_identifier(&pool, "ana@example.com", None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        pool.close().await;
    }

    #[tokio::test]
    async fn identifier_match_is_exact_and_case_sensitive() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        insert_at(&pool, "Ana@example.com", "general", 100).await;

        assert!(find_by_identifier(&pool, "ana@example.com", None)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            find_by_identifier(&pool, "Ana@example.com", None)
                .await
                .unwrap()
                .len(),
            1
        );
        pool.close().await;
    }

    #[tokio::test]
    async fn unknown_identifier_on_empty_store_is_an_empty_sequence() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        let records = find_by_identifier(&pool, "unknown@example.com", None)
            .await
            .unwrap();
        assert!(records.is_empty());
        pool.close().await;
    }

    #[tokio::test]
    async fn unparseable_metrics_read_back_as_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        sqlx::query(
            "INSERT INTO analyses \
             (identifier, document_type, source_text, analysis_text, metrics, created_at) \
             VALUES ('ana@example.com', 'general', 'src', 'out', 'not json', 100)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let records = find_by_identifier(&pool, "ana@example.com", None)
            .await
            .unwrap();
        assert!(records[0].metrics.is_none());
        pool.close().await;
    }

    #[tokio::test]
    async fn classified_resume_persists_and_retrieves_as_resume() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = store_pool(&dir).await;

        let text = "Minha formação acadêmica inclui...";
        let document_type = classify::classify(text);
        assert_eq!(document_type, DocumentType::Resume);

        let analysis = NewAnalysis {
            identifier: "joao@example.com".to_string(),
            document_type,
            source_text: text.to_string(),
            analysis_text: "parecer sobre o currículo".to_string(),
            metrics: None,
        };
        save(&pool, &analysis).await.unwrap();

        let records = find_by_identifier(&pool, "joao@example.com", None)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document_type, DocumentType::Resume);
        pool.close().await;
    }
}
