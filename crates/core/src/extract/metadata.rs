//! Article metadata extraction, one fallback chain per field.

use scraper::Html;

use crate::dom::{DocumentSnapshot, document_title, select_first_any, text_content};
use crate::extract::rules::CompiledRules;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ArticleMetadata {
	pub(crate) title: String,
	pub(crate) byline: String,
	pub(crate) excerpt: String,
	pub(crate) site_name: String,
	pub(crate) published_time: String,
}

/// Reads metadata from the de-noised snapshot, independently of content selection.
pub(crate) fn extract_metadata(snapshot: &DocumentSnapshot, rules: &CompiledRules) -> ArticleMetadata {
	let html = snapshot.html();

	let title = meta_content(html, &rules.title_meta).unwrap_or_else(|| document_title(html));
	let byline = select_first_any(html, &rules.byline)
		.map(|el| text_content(el).trim().to_string())
		.unwrap_or_default();
	let excerpt = meta_content(html, &rules.excerpt).unwrap_or_default();
	let site_name = meta_content(html, &rules.site_name_meta)
		.or_else(|| snapshot.domain().map(str::to_string))
		.unwrap_or_default();
	let published_time = select_first_any(html, &rules.published)
		.map(|el| match el.value().attr("datetime").filter(|value| !value.is_empty()) {
			Some(datetime) => datetime.to_string(),
			None => text_content(el).trim().to_string(),
		})
		.unwrap_or_default();

	ArticleMetadata {
		title,
		byline,
		excerpt,
		site_name,
		published_time,
	}
}

/// `content` of the first matching meta element, when non-empty.
///
/// Only the first match is consulted; an empty first match does not fall
/// through to later ones.
fn meta_content(html: &Html, selectors: &[scraper::Selector]) -> Option<String> {
	select_first_any(html, selectors)
		.and_then(|el| el.value().attr("content"))
		.filter(|content| !content.is_empty())
		.map(str::to_string)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::extract::ExtractorRules;

	fn metadata(markup: &str, url: Option<&str>) -> ArticleMetadata {
		let snapshot = DocumentSnapshot::parse(markup, url);
		let rules = CompiledRules::compile(ExtractorRules::embedded()).unwrap();
		extract_metadata(&snapshot, &rules)
	}

	#[test]
	fn og_title_overrides_document_title() {
		let meta = metadata(r#"<html><head><title>Doc Title</title><meta property="og:title" content="OG Title"></head></html>"#, None);
		assert_eq!(meta.title, "OG Title");
	}

	#[test]
	fn empty_og_title_keeps_document_title() {
		let meta = metadata("<html><head><title>\n  Doc   Title \n</title><meta property='og:title' content=''></head></html>", None);
		assert_eq!(meta.title, "Doc Title");
	}

	#[test]
	fn svg_titles_are_not_the_document_title() {
		let meta = metadata("<html><head></head><body><article><svg><title>Close icon</title></svg><p>Story</p></article></body></html>", None);
		assert_eq!(meta.title, "");
		let meta = metadata("<html><head><title>Real</title></head><body><svg><title>Icon</title></svg></body></html>", None);
		assert_eq!(meta.title, "Real");
	}

	#[test]
	fn byline_takes_first_author_marker_in_document_order() {
		let meta = metadata("<body><span class='byline'>  By Grace Hopper </span><a rel='author'>Ada</a></body>", None);
		assert_eq!(meta.byline, "By Grace Hopper");
	}

	#[test]
	fn excerpt_reads_description_or_og_description() {
		let meta = metadata("<head><meta property='og:description' content='From OG'></head>", None);
		assert_eq!(meta.excerpt, "From OG");
		let meta = metadata("<head><meta name='description' content='Plain'><meta property='og:description' content='From OG'></head>", None);
		assert_eq!(meta.excerpt, "Plain");
	}

	#[test]
	fn site_name_falls_back_to_domain_then_empty() {
		let meta = metadata("<head><meta property='og:site_name' content='The Daily'></head>", Some("https://daily.example.com/x"));
		assert_eq!(meta.site_name, "The Daily");
		let meta = metadata("<p>x</p>", Some("https://daily.example.com/x"));
		assert_eq!(meta.site_name, "daily.example.com");
		assert_eq!(metadata("<p>x</p>", None).site_name, "");
	}

	#[test]
	fn published_prefers_datetime_then_text() {
		let meta = metadata("<body><time datetime='2024-03-01T08:00:00Z'>March 1</time></body>", None);
		assert_eq!(meta.published_time, "2024-03-01T08:00:00Z");
		let meta = metadata("<body><span itemprop='datePublished'> 1 March 2024 </span></body>", None);
		assert_eq!(meta.published_time, "1 March 2024");
		let meta = metadata("<body><time>no datetime attribute</time></body>", None);
		assert_eq!(meta.published_time, "");
	}

	#[test]
	fn missing_metadata_is_empty() {
		assert_eq!(metadata("<body><p>Only text</p></body>", None), ArticleMetadata::default());
	}
}
