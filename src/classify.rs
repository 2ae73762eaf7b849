//! Document classification: keyword heuristic and model-backed strategy.
//!
//! The keyword classifier is a case-insensitive substring search over fixed
//! keyword sets, checked in a fixed priority order; first match wins, no
//! match yields `general`. It is a heuristic, not a guarantee; no confidence
//! score is produced.
//!
//! The model-backed classifier asks the upstream model for a one-word label
//! instead. The two strategies are interchangeable behind
//! [`ClassifierStrategy`] but are not guaranteed to agree.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AppError;
use crate::models::DocumentType;
use crate::prompt;
use crate::upstream::AnalysisClient;

/// Keyword sets in priority order: a text matching two sets gets the
/// earlier-listed type. `scope` and `general` have no keywords; `scope` is
/// only ever chosen explicitly and `general` is the fallback.
pub const KEYWORD_RULES: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::Tcc,
        &["resumo", "referencial teórico", "metodologia", "conclusão"],
    ),
    (
        DocumentType::Resume,
        &[
            "experiência profissional",
            "objetivo profissional",
            "formação acadêmica",
        ],
    ),
    (
        DocumentType::Financial,
        &[
            "ativo",
            "passivo",
            "demonstrativo",
            "balanço patrimonial",
            "fluxo de caixa",
        ],
    ),
    (
        DocumentType::Design,
        &["tela", "fluxo de navegação", "wireframe", "layout", "ux", "ui"],
    ),
];

/// Classify a text by keyword heuristics. Pure; always returns a value.
pub fn classify(text: &str) -> DocumentType {
    let lowered = text.to_lowercase();
    for (document_type, keywords) in KEYWORD_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *document_type;
        }
    }
    DocumentType::General
}

/// A classification strategy. The keyword strategy never fails; the model
/// strategy can fail upstream.
#[async_trait]
pub trait ClassifierStrategy: Send + Sync {
    async fn classify(&self, text: &str) -> Result<DocumentType, AppError>;
}

/// Wraps the keyword heuristic.
pub struct KeywordClassifier;

#[async_trait]
impl ClassifierStrategy for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<DocumentType, AppError> {
        Ok(classify(text))
    }
}

/// Asks the upstream model to classify the document with a one-word answer.
/// The reply is trimmed and lower-cased; unrecognized answers fall back to
/// `general`.
pub struct ModelClassifier {
    client: Arc<AnalysisClient>,
}

impl ModelClassifier {
    pub fn new(client: Arc<AnalysisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClassifierStrategy for ModelClassifier {
    async fn classify(&self, text: &str) -> Result<DocumentType, AppError> {
        let reply = self
            .client
            .analyze(&prompt::classification_prompt(text))
            .await?;
        let label = reply.trim().to_lowercase();
        let document_type = label.parse().unwrap_or(DocumentType::General);
        debug!(%label, %document_type, "model classification");
        Ok(document_type)
    }
}

/// Instantiate the strategy named in config. Unknown names are rejected at
/// config load, so anything else here means the keyword default.
pub fn create_classifier(
    config: &AnalysisConfig,
    client: &Arc<AnalysisClient>,
) -> Box<dyn ClassifierStrategy> {
    match config.classifier.as_str() {
        "model" => Box::new(ModelClassifier::new(Arc::clone(client))),
        _ => Box::new(KeywordClassifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_keyword_set_maps_to_its_type() {
        for (document_type, keywords) in KEYWORD_RULES {
            for keyword in *keywords {
                assert_eq!(
                    classify(keyword),
                    *document_type,
                    "keyword '{}' must classify as {}",
                    keyword,
                    document_type
                );
            }
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("RESUMO do trabalho"), DocumentType::Tcc);
        assert_eq!(
            classify("Minha Formação Acadêmica inclui..."),
            DocumentType::Resume
        );
    }

    #[test]
    fn earlier_category_wins_on_ties() {
        // metodologia (tcc) + formação acadêmica (resume): tcc is checked first
        assert_eq!(
            classify("a metodologia cobre a formação acadêmica dos participantes"),
            DocumentType::Tcc
        );
        // balanço patrimonial (financial) + wireframe (design): financial wins
        assert_eq!(
            classify("wireframe do balanço patrimonial"),
            DocumentType::Financial
        );
    }

    #[test]
    fn empty_or_keyword_free_text_is_general() {
        assert_eq!(classify(""), DocumentType::General);
        assert_eq!(
            classify("bom dia, este é um documento comum sem marcadores."),
            DocumentType::General
        );
    }

    #[test]
    fn resume_scenario_from_history_flow() {
        assert_eq!(
            classify("Minha formação acadêmica inclui..."),
            DocumentType::Resume
        );
    }

    #[tokio::test]
    async fn keyword_strategy_matches_pure_function() {
        let strategy = KeywordClassifier;
        let text = "demonstrativo de fluxo de caixa";
        assert_eq!(strategy.classify(text).await.unwrap(), classify(text));
    }
}
