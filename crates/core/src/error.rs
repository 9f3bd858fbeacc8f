//! Error types for extraction, presentation and reader sessions.

use thiserror::Error;

use crate::config::Messages;

/// Result alias for reader session operations.
pub type Result<T, E = ReaderError> = std::result::Result<T, E>;

/// Extraction could not produce an article.
///
/// Both variants surface to users as the same "content extraction failed"
/// notification; the distinction only feeds logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
	/// The snapshot has no body, or the selected content is empty.
	#[error("no readable content found")]
	NoContentFound,
	/// An internal fault while walking a malformed document.
	#[error("extraction fault: {0}")]
	Internal(String),
}

/// Extraction rules failed to load, so the extractor is unavailable.
#[derive(Debug, Error)]
pub enum RulesError {
	#[error("failed to parse extraction rules: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid selector `{selector}` in {rule}: {reason}")]
	Selector { rule: &'static str, selector: String, reason: String },
}

/// A page view could not present or inspect the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
	#[error("page has no body to attach the reading view to")]
	MissingBody,
	#[error("page operation failed: {0}")]
	Host(String),
}

/// The persisted reader flag could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to persist reader state: {0}")]
pub struct StoreError(pub String);

/// Any failure of a reader-mode transition.
#[derive(Debug, Error)]
pub enum ReaderError {
	#[error(transparent)]
	Extraction(#[from] ExtractionFailure),
	#[error("reader components unavailable: {0}")]
	ComponentUnavailable(String),
	#[error("failed to present reading view: {0}")]
	PresentationFailed(#[from] PageError),
}

impl ReaderError {
	/// Stable short code used in logs and CLI output.
	pub fn code(&self) -> &'static str {
		match self {
			ReaderError::Extraction(_) => "EXTRACTION_FAILED",
			ReaderError::ComponentUnavailable(_) => "COMPONENT_UNAVAILABLE",
			ReaderError::PresentationFailed(_) => "PRESENTATION_FAILED",
		}
	}

	/// Toast text shown to the user for this failure.
	pub fn toast<'a>(&self, messages: &'a Messages) -> &'a str {
		match self {
			ReaderError::Extraction(_) => &messages.extraction_failed,
			ReaderError::ComponentUnavailable(_) => &messages.components_unavailable,
			ReaderError::PresentationFailed(_) => &messages.presentation_failed,
		}
	}
}

impl From<&RulesError> for ReaderError {
	fn from(err: &RulesError) -> Self {
		ReaderError::ComponentUnavailable(err.to_string())
	}
}
