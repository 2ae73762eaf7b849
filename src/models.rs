//! Core data model: document types and analysis records.
//!
//! These types flow through the whole pipeline, from classification to
//! persistence and PDF rendering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed set of document-type labels driving prompt selection.
///
/// The classifier assigns one of these from keyword heuristics; the user may
/// also pick one explicitly on the command line. Anything unrecognized falls
/// back to [`DocumentType::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// Academic thesis / final-year project ("trabalho de conclusão de curso").
    Tcc,
    /// Résumé / CV.
    Resume,
    /// Financial statement or report.
    Financial,
    /// UX/UI design material (may arrive as an image).
    Design,
    /// Project scope document.
    Scope,
    /// Everything else.
    General,
}

impl DocumentType {
    /// All variants, in classifier priority order (general last).
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Tcc,
        DocumentType::Resume,
        DocumentType::Financial,
        DocumentType::Design,
        DocumentType::Scope,
        DocumentType::General,
    ];

    /// Stable string form, used in the database and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Tcc => "tcc",
            DocumentType::Resume => "resume",
            DocumentType::Financial => "financial",
            DocumentType::Design => "design",
            DocumentType::Scope => "scope",
            DocumentType::General => "general",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcc" => Ok(DocumentType::Tcc),
            "resume" => Ok(DocumentType::Resume),
            "financial" => Ok(DocumentType::Financial),
            "design" => Ok(DocumentType::Design),
            "scope" => Ok(DocumentType::Scope),
            "general" => Ok(DocumentType::General),
            other => Err(format!(
                "unknown document type '{}'. Must be one of: tcc, resume, financial, design, scope, general",
                other
            )),
        }
    }
}

/// One completed analysis, as stored in the `analyses` table.
///
/// Records are append-only: created exactly once when an analysis completes,
/// never updated, never deleted.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    /// Auto-assigned primary key; immutable once created.
    pub id: i64,
    /// User-supplied name or email; groups records for history retrieval.
    pub identifier: String,
    pub document_type: DocumentType,
    /// Extracted or pasted text, truncated to the configured cap before storage.
    pub source_text: String,
    /// Full model output; never truncated.
    pub analysis_text: String,
    /// Optional metric-name → score mapping, stored as a JSON object.
    pub metrics: Option<BTreeMap<String, f64>>,
    /// Unix timestamp set at creation; history sort key (descending).
    pub created_at: i64,
}

/// Insert shape for [`AnalysisRecord`]; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub identifier: String,
    pub document_type: DocumentType,
    pub source_text: String,
    pub analysis_text: String,
    pub metrics: Option<BTreeMap<String, f64>>,
}

/// Raster image accepted for multimodal design analysis.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    /// `image/png` or `image/jpeg`.
    pub mime: &'static str,
}
