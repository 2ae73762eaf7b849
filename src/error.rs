//! User-facing failure taxonomy for the analysis flow.
//!
//! Every failure in a single submit/history action is converted to exactly one
//! of these variants at the top of the handling sequence and surfaced as one
//! message. There is no partial-success state: either a complete record is
//! written, or nothing is.

/// Failure categories for one user-triggered action.
#[derive(Debug)]
pub enum AppError {
    /// Required field missing (no file/text, or no identifier). Nothing is
    /// submitted upstream.
    Input(String),
    /// Unsupported or corrupt file content. No partial record is saved.
    Extraction(String),
    /// Hosted model unreachable, rejected the request, or timed out.
    /// No record is saved; the user may resubmit.
    Upstream(String),
    /// Storage read or write failure.
    Persistence(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Input(msg) => write!(f, "invalid input: {}", msg),
            AppError::Extraction(msg) => write!(f, "could not read document: {}", msg),
            AppError::Upstream(msg) => write!(f, "analysis request failed: {}", msg),
            AppError::Persistence(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
