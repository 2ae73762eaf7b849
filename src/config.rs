use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

/// Hosted chat-completion endpoint settings.
///
/// The API key itself is never written to the config file; only the name of
/// the environment variable that carries it. The client reads that variable
/// once at construction.
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether the endpoint accepts image attachments for design analysis.
    /// When false, an image upload is replaced by a fixed placeholder string
    /// in the prompt.
    #[serde(default)]
    pub supports_image_input: bool,
    /// Optional `HTTP-Referer` header (OpenRouter attribution).
    #[serde(default)]
    pub referer: Option<String>,
    /// Optional `X-Title` header (OpenRouter attribution).
    #[serde(default)]
    pub app_title: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            supports_image_input: false,
            referer: None,
            app_title: None,
        }
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}
fn default_model() -> String {
    "mistralai/mistral-7b-instruct".to_string()
}
fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}
fn default_temperature() -> f64 {
    0.3
}
fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Source text is truncated to this many characters before storage.
    /// The analysis text itself is never truncated.
    #[serde(default = "default_max_source_chars")]
    pub max_source_chars: usize,
    /// Classification strategy: `keyword` (heuristic) or `model` (asks the
    /// upstream model for a one-word label).
    #[serde(default = "default_classifier")]
    pub classifier: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_source_chars: default_max_source_chars(),
            classifier: default_classifier(),
        }
    }
}

fn default_max_source_chars() -> usize {
    10_000
}
fn default_classifier() -> String {
    "keyword".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// PDF page size: `letter` or `a4`.
    #[serde(default = "default_page_size")]
    pub page_size: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> String {
    "letter".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.upstream.base_url.trim().is_empty() {
        anyhow::bail!("upstream.base_url must not be empty");
    }
    if config.upstream.model.trim().is_empty() {
        anyhow::bail!("upstream.model must not be empty");
    }
    if config.upstream.timeout_secs == 0 {
        anyhow::bail!("upstream.timeout_secs must be > 0");
    }
    if config.analysis.max_source_chars == 0 {
        anyhow::bail!("analysis.max_source_chars must be > 0");
    }

    match config.analysis.classifier.as_str() {
        "keyword" | "model" => {}
        other => anyhow::bail!(
            "Unknown classifier strategy: '{}'. Must be keyword or model.",
            other
        ),
    }

    match config.report.page_size.as_str() {
        "letter" | "a4" => {}
        other => anyhow::bail!("Unknown page size: '{}'. Must be letter or a4.", other),
    }

    Ok(config)
}
