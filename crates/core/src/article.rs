//! The extracted article record.

use serde::Serialize;

/// Result of a successful extraction.
///
/// Only the extractor constructs articles, so `content` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
	title: String,
	byline: String,
	content: String,
	excerpt: String,
	site_name: String,
	published_time: String,
}

impl Article {
	pub(crate) fn new(title: String, byline: String, content: String, excerpt: String, site_name: String, published_time: String) -> Self {
		Self {
			title,
			byline,
			content,
			excerpt,
			site_name,
			published_time,
		}
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn byline(&self) -> &str {
		&self.byline
	}

	/// Cleaned body markup.
	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn excerpt(&self) -> &str {
		&self.excerpt
	}

	pub fn site_name(&self) -> &str {
		&self.site_name
	}

	/// Raw published value as found in the page; not guaranteed to parse as a date.
	pub fn published_time(&self) -> &str {
		&self.published_time
	}

	/// Plain-text rendering of [`Self::content`].
	pub fn text(&self) -> String {
		crate::extract::markup_to_text(&self.content)
	}
}
