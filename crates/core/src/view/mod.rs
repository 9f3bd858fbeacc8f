//! Reading view synthesis.
//!
//! A [`ReadingView`] is plain markup plus the ids a page view needs to find
//! and remove what it injected. Page views decide how to attach it.

use html_escape::encode_text;

use crate::article::Article;
use crate::config::ReaderConfig;

const READER_CSS: &str = include_str!("reader.css");

const CONTAINER_STYLE: &str = "position: fixed; top: 0; left: 0; right: 0; bottom: 0; z-index: 2147483647; background: #f9f9f5; \
	padding: 20px; overflow-y: auto; font-family: 'Georgia', 'Times New Roman', serif;";

const CONTENT_STYLE: &str = "max-width: 700px; margin: 0 auto; padding: 20px 0; line-height: 1.6; color: #333;";

const EXIT_STYLE: &str = "position: fixed; top: 10px; left: 10px; z-index: 2147483648; background: rgba(0,0,0,0.7); color: white; \
	border: none; padding: 8px 16px; border-radius: 4px; cursor: pointer; font-size: 14px;";

/// Separator between byline, date and site name in the meta line.
pub const META_SEPARATOR: &str = " · ";

/// Everything needed to present one article as a reading view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingView {
	pub container_id: String,
	pub content_id: String,
	pub exit_control_id: String,
	pub exit_label: String,
	pub filter_style_id: String,
	pub filter_css: String,
	title: String,
	meta_line: String,
	content: String,
	stylesheet: String,
}

impl ReadingView {
	pub fn from_article(article: &Article, config: &ReaderConfig) -> Self {
		let meta_line = [article.byline(), article.published_time(), article.site_name()]
			.into_iter()
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join(META_SEPARATOR);

		Self {
			container_id: config.container_id.clone(),
			content_id: config.content_id.clone(),
			exit_control_id: config.exit_control_id.clone(),
			exit_label: config.exit_label.clone(),
			filter_style_id: config.filter_style_id.clone(),
			filter_css: config.filter_css(),
			title: article.title().to_string(),
			meta_line,
			content: article.content().to_string(),
			stylesheet: READER_CSS.replace("#reader-content", &format!("#{}", config.content_id)),
		}
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	/// Byline, published time and site name joined by [`META_SEPARATOR`]; empty when all are.
	pub fn meta_line(&self) -> &str {
		&self.meta_line
	}

	/// Inner markup of the content column: title, meta line, article, stylesheet.
	pub fn content_markup(&self) -> String {
		let mut out = String::new();
		if !self.title.is_empty() {
			out.push_str(&format!("<h1>{}</h1>", encode_text(&self.title)));
		}
		if !self.meta_line.is_empty() {
			out.push_str(&format!("<p class=\"reader-meta\">{}</p>", encode_text(&self.meta_line)));
		}
		out.push_str(&self.content);
		out.push_str(&format!("<style>{}</style>", self.stylesheet));
		out
	}

	/// Full-viewport container wrapping the content column.
	pub fn container_markup(&self) -> String {
		format!(
			"<div id=\"{}\" style=\"{CONTAINER_STYLE}\"><div id=\"{}\" style=\"{CONTENT_STYLE}\">{}</div></div>",
			self.container_id,
			self.content_id,
			self.content_markup()
		)
	}

	/// Fixed exit button, outside the container so it stays put while scrolling.
	pub fn exit_control_markup(&self) -> String {
		format!(
			"<button id=\"{}\" type=\"button\" style=\"{EXIT_STYLE}\">{}</button>",
			self.exit_control_id,
			encode_text(&self.exit_label)
		)
	}

	/// `<style>` element applying the page-wide filter.
	pub fn filter_markup(&self) -> String {
		format!("<style id=\"{}\">{}</style>", self.filter_style_id, self.filter_css)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::extract::extract_article;

	fn view(markup: &str) -> ReadingView {
		let article = extract_article(markup, Some("https://blog.example.net/p/1")).unwrap();
		ReadingView::from_article(&article, &ReaderConfig::default())
	}

	#[test]
	fn meta_line_joins_present_parts() {
		let view = view("<head><title>T</title></head><body><article><span class='author'>Ada</span><time datetime='2024-01-02'>Jan 2</time><p>Body</p></article></body>");
		assert_eq!(view.meta_line(), "Ada · 2024-01-02 · blog.example.net");
	}

	#[test]
	fn untitled_article_has_no_heading() {
		let markup = view("<body><article><p>Body</p></article></body>").content_markup();
		assert!(!markup.contains("<h1>"));
		assert!(markup.starts_with("<p class=\"reader-meta\">blog.example.net</p><article>"));
	}

	#[test]
	fn title_is_escaped() {
		let view = view("<head><title>Tom &amp; Jerry &lt;3</title></head><body><article><p>Body</p></article></body>");
		assert!(view.content_markup().starts_with("<h1>Tom &amp; Jerry &lt;3</h1>"));
	}

	#[test]
	fn container_and_controls_carry_configured_ids() {
		let view = view("<body><article><p>Body</p></article></body>");
		assert!(view.container_markup().starts_with("<div id=\"reader-container\""));
		assert!(view.container_markup().contains("<div id=\"reader-content\""));
		assert!(view.exit_control_markup().contains("← 返回"));
		assert!(view.filter_markup().starts_with("<style id=\"eink-filter-style\">:root{filter:grayscale(1)"));
	}
}
