//! History retrieval: list past analyses for an identifier and optionally
//! regenerate their PDF reports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::analyze::configured_page_size;
use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::migrate;
use crate::models::DocumentType;
use crate::report;
use crate::store;

/// Characters of analysis text shown per listed record.
const EXCERPT_CHARS: usize = 160;

pub struct HistoryRequest {
    pub identifier: String,
    /// `None` lists every document type.
    pub document_type: Option<DocumentType>,
    /// Directory to regenerate one PDF per record into, if requested.
    pub pdf_dir: Option<PathBuf>,
}

pub async fn run(config: &Config, request: HistoryRequest) -> Result<()> {
    let identifier = request.identifier.trim();
    if identifier.is_empty() {
        return Err(AppError::Input("identifier must not be empty".to_string()).into());
    }

    let pool = db::connect(config).await?;
    migrate::migrate_pool(&pool).await?;
    let records = store::find_by_identifier(&pool, identifier, request.document_type).await?;
    pool.close().await;

    if records.is_empty() {
        println!("no analyses found for {}", identifier);
        return Ok(());
    }

    info!(count = records.len(), %identifier, "listing analyses");
    for record in &records {
        println!(
            "[{}] {} {}",
            record.id,
            format_timestamp(record.created_at),
            record.document_type
        );
        println!("  {}", excerpt(&record.analysis_text, EXCERPT_CHARS));
    }

    if let Some(dir) = &request.pdf_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
        let page_size = configured_page_size(&config.report);
        for record in &records {
            let path = dir.join(format!("analise_{}.pdf", record.id));
            let written = report::render(&record.analysis_text, report::DEFAULT_TITLE, page_size)
                .and_then(|bytes| {
                    std::fs::write(&path, bytes).map_err(|e| AppError::Extraction(e.to_string()))
                });
            match written {
                Ok(()) => println!("Report written to {}", path.display()),
                // Other records still get their reports.
                Err(e) => eprintln!("warning: report for analysis {} failed: {}", record.id, e),
            }
        }
    }

    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    match chrono::DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}

/// Single-line excerpt: whitespace collapsed, truncated with an ellipsis.
fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let mut out: String = flat.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}
