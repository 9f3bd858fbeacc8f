//! Article extraction from document snapshots.
//!
//! The pipeline keeps noise removal, content location, metadata extraction
//! and cleanup as separate stages:
//!
//! 1. strip scripts, styles, unlikely candidates and hidden elements;
//! 2. locate the main content (selectors, paragraph density, body);
//! 3. read metadata from the de-noised document;
//! 4. prune empty wrappers from a copy of the content and serialize it.

mod cleanup;
mod locate;
mod metadata;
mod noise;
mod rules;
pub(crate) mod text;

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::article::Article;
use crate::dom::DocumentSnapshot;
use crate::error::{ExtractionFailure, RulesError};
use cleanup::clean_content;
use locate::locate_main_content;
use metadata::extract_metadata;
use noise::strip_noise;
use rules::CompiledRules;

pub use rules::ExtractorRules;
pub use text::markup_to_text;

/// Compiled extractor. Building it is the only fallible step; extraction never panics outward.
#[derive(Debug)]
pub struct Extractor {
	rules: CompiledRules,
}

impl Extractor {
	pub fn new(rules: &ExtractorRules) -> Result<Self, RulesError> {
		Ok(Self {
			rules: CompiledRules::compile(rules)?,
		})
	}

	/// Extractor using the rules shipped with the crate.
	pub fn with_embedded_rules() -> Result<Self, RulesError> {
		Self::new(ExtractorRules::embedded())
	}

	/// Produces an article from `snapshot` or reports why none was found.
	///
	/// Pure and idempotent: the same snapshot always yields the same result.
	/// Any fault inside the pipeline, a panic included, degrades to
	/// [`ExtractionFailure::Internal`].
	///
	/// Panics are only caught where they unwind. `wasm32-unknown-unknown`
	/// aborts on panic, so in the content script a panic ends the module and
	/// no `Internal` failure is returned.
	pub fn extract(&self, snapshot: DocumentSnapshot) -> Result<Article, ExtractionFailure> {
		match panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(snapshot))) {
			Ok(result) => result,
			Err(payload) => {
				let reason = payload
					.downcast_ref::<&str>()
					.map(|s| s.to_string())
					.or_else(|| payload.downcast_ref::<String>().cloned())
					.unwrap_or_else(|| "extraction panicked".to_string());
				warn!(target = "inky.extract", %reason, "extraction pipeline panicked");
				Err(ExtractionFailure::Internal(reason))
			}
		}
	}

	fn run_pipeline(&self, mut snapshot: DocumentSnapshot) -> Result<Article, ExtractionFailure> {
		let removed = strip_noise(snapshot.html_mut(), &self.rules);
		let located = locate_main_content(snapshot.html(), &self.rules)?;
		debug!(
			target = "inky.extract",
			removed,
			strategy = ?located.strategy,
			"located main content"
		);

		let metadata = extract_metadata(&snapshot, &self.rules);
		let content = clean_content(snapshot.html(), located.id, &self.rules)?;
		debug!(target = "inky.extract", content_len = content.len(), title = %metadata.title, "extracted article");

		Ok(Article::new(
			metadata.title,
			metadata.byline,
			content,
			metadata.excerpt,
			metadata.site_name,
			metadata.published_time,
		))
	}
}

/// Extracts an article from raw markup with the embedded rules.
pub fn extract_article(markup: &str, url: Option<&str>) -> Result<Article, ExtractionFailure> {
	let extractor = Extractor::with_embedded_rules().map_err(|err| ExtractionFailure::Internal(err.to_string()))?;
	extractor.extract(DocumentSnapshot::parse(markup, url))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_article_and_drops_page_chrome() {
		let html = "<html><head><title>Story</title></head><body><header>Navigation</header><article><h1>Story</h1><p>The primary article content.</p></article><aside>Related links</aside></body></html>";
		let article = extract_article(html, Some("https://example.com/story")).unwrap();
		assert_eq!(article.title(), "Story");
		assert_eq!(article.site_name(), "example.com");
		assert_eq!(article.content(), "<article><h1>Story</h1><p>The primary article content.</p></article>");
	}

	#[test]
	fn tolerates_malformed_markup() {
		let article = extract_article("<main><h1>Broken<h1><p>Still readable", None).unwrap();
		assert!(article.text().contains("Still readable"));
	}

	#[test]
	fn metadata_survives_when_byline_sits_in_content() {
		let html = "<body><article><p class='byline'>By Ada</p><p>Text</p></article></body>";
		let article = extract_article(html, None).unwrap();
		assert_eq!(article.byline(), "By Ada");
		assert!(article.content().contains("By Ada"));
	}

	#[test]
	fn missing_content_is_reported() {
		assert_eq!(extract_article("<html><body>   </body></html>", None), Err(ExtractionFailure::NoContentFound));
	}
}
