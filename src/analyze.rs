//! The end-to-end analysis pipeline.
//!
//! One submission flows strictly through: input validation, content
//! extraction, classification (explicit type or strategy), prompt fill,
//! upstream analysis, persistence, and optionally a PDF report. Any failure
//! before the save step aborts the submission without writing a record; a
//! report failure after the save is reported but leaves the record in place.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::classify;
use crate::config::{Config, ReportConfig};
use crate::db;
use crate::error::AppError;
use crate::extract::{self, Extracted};
use crate::migrate;
use crate::models::{DocumentType, NewAnalysis};
use crate::prompt;
use crate::report::{self, PageSize};
use crate::store;
use crate::upstream::AnalysisClient;

/// One analysis submission.
pub struct AnalyzeRequest {
    /// Document to analyze. Takes precedence over `text`.
    pub file: Option<PathBuf>,
    /// Pasted text, used when no file is given.
    pub text: Option<String>,
    /// Who the analysis belongs to, matched exactly on retrieval.
    pub identifier: String,
    /// Explicit document type; `None` means classify automatically.
    pub document_type: Option<DocumentType>,
    /// Where to write the PDF report, if requested.
    pub pdf_out: Option<PathBuf>,
}

/// Illustrative per-criterion scores attached to every stored analysis. The
/// values are fixed; they are presentation data, not model output.
pub fn fixed_metrics() -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();
    metrics.insert("clareza".to_string(), 4.2);
    metrics.insert("viabilidade".to_string(), 3.8);
    metrics.insert("organizacao".to_string(), 4.5);
    metrics.insert("riscos".to_string(), 2.9);
    metrics
}

/// Truncates to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Resolves the configured page size. Unknown values are rejected at config
/// load, so the fallback is unreachable in practice.
pub fn configured_page_size(config: &ReportConfig) -> PageSize {
    PageSize::parse(&config.page_size).unwrap_or(PageSize::Letter)
}

pub async fn run(config: &Config, request: AnalyzeRequest) -> Result<()> {
    let identifier = request.identifier.trim().to_string();
    if identifier.is_empty() {
        return Err(AppError::Input("identifier must not be empty".to_string()).into());
    }

    let extracted = match &request.file {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                AppError::Input(format!("could not read {}: {}", path.display(), e))
            })?;
            extract::extract(&bytes)?
        }
        None => match &request.text {
            Some(text) if !text.trim().is_empty() => Extracted::Text(text.clone()),
            _ => {
                return Err(
                    AppError::Input("provide a document file or pasted text".to_string()).into(),
                )
            }
        },
    };

    let client = Arc::new(AnalysisClient::new(&config.upstream)?);

    let (document_type, filled, source_text) = match extracted {
        Extracted::Text(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Err(AppError::Extraction(
                    "document contains no extractable text".to_string(),
                )
                .into());
            }
            let document_type = match request.document_type {
                Some(ty) => ty,
                None => {
                    classify::create_classifier(&config.analysis, &client)
                        .classify(&text)
                        .await?
                }
            };
            let filled = prompt::build(document_type, &text);
            (document_type, filled, text)
        }
        Extracted::Image(image) => {
            // Image uploads are design material unless told otherwise.
            let document_type = request.document_type.unwrap_or(DocumentType::Design);
            let filled = if client.supports_image_input() {
                prompt::build_with_image(document_type, image)
            } else {
                prompt::build(document_type, prompt::IMAGE_PLACEHOLDER)
            };
            (document_type, filled, prompt::IMAGE_PLACEHOLDER.to_string())
        }
    };

    info!(%document_type, %identifier, "document classified");
    println!("Document type: {}", document_type);

    let analysis_text = client.analyze(&filled).await?;
    println!("\n{}\n", analysis_text.trim());

    let pool = db::connect(config).await?;
    migrate::migrate_pool(&pool).await?;

    let record = NewAnalysis {
        identifier: identifier.clone(),
        document_type,
        source_text: truncate_chars(&source_text, config.analysis.max_source_chars),
        analysis_text: analysis_text.clone(),
        metrics: Some(fixed_metrics()),
    };
    let id = store::save(&pool, &record).await?;
    pool.close().await;

    println!("Saved analysis {} for {}", id, identifier);

    if let Some(path) = &request.pdf_out {
        let page_size = configured_page_size(&config.report);
        let written = report::render(&analysis_text, report::DEFAULT_TITLE, page_size)
            .and_then(|bytes| {
                std::fs::write(path, bytes).map_err(|e| AppError::Extraction(e.to_string()))
            });
        match written {
            Ok(()) => println!("Report written to {}", path.display()),
            // The record is already saved; a report failure is not fatal.
            Err(e) => eprintln!("warning: analysis saved but report generation failed: {}", e),
        }
    }

    Ok(())
}
