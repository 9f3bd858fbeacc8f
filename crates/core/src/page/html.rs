//! A page view over a markup string.

use std::sync::LazyLock;

use regex_lite::Regex;
use scraper::Html;

use super::{PageView, SavedPage};
use crate::dom::{DocumentSnapshot, document_title};
use crate::error::PageError;
use crate::view::ReadingView;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)(<title[^>]*>)(.*?)(</title>)").expect("TITLE_RE should compile"));

#[derive(Debug, Clone)]
struct Injected {
	body: String,
	root: String,
}

/// In-memory page: original markup plus the live title and whatever reader mode injected.
///
/// [`HtmlPage::render`] produces the current document. With nothing injected
/// and the title untouched it renders the original markup byte-for-byte.
#[derive(Debug, Clone)]
pub struct HtmlPage {
	markup: String,
	url: Option<String>,
	parsed_title: String,
	title: String,
	injected: Option<Injected>,
}

impl HtmlPage {
	pub fn new(markup: impl Into<String>, url: Option<&str>) -> Self {
		let markup = markup.into();
		let parsed_title = parse_title(&markup);
		Self {
			markup,
			url: url.map(str::to_string),
			title: parsed_title.clone(),
			parsed_title,
			injected: None,
		}
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	/// Changes the live title, as a page script would.
	pub fn set_title(&mut self, title: impl Into<String>) {
		self.title = title.into();
	}

	/// Whether a reading view is currently injected.
	pub fn is_presenting(&self) -> bool {
		self.injected.is_some()
	}

	/// Current document markup.
	pub fn render(&self) -> String {
		let mut out = if self.title == self.parsed_title {
			self.markup.clone()
		} else {
			with_title(&self.markup, &self.title)
		};

		if let Some(injected) = &self.injected {
			insert_before_close(&mut out, "</body>", &injected.body);
			insert_before_close(&mut out, "</html>", &injected.root);
		}
		out
	}
}

impl PageView for HtmlPage {
	fn save(&self) -> SavedPage {
		SavedPage::new(self.render(), self.title.clone())
	}

	fn snapshot(&self) -> Result<DocumentSnapshot, PageError> {
		Ok(DocumentSnapshot::parse(&self.render(), self.url.as_deref()))
	}

	fn present(&mut self, view: &ReadingView) -> Result<(), PageError> {
		if self.injected.is_some() {
			return Err(PageError::Host("a reading view is already presented".to_string()));
		}
		self.injected = Some(Injected {
			body: format!("{}{}", view.container_markup(), view.exit_control_markup()),
			root: view.filter_markup(),
		});
		Ok(())
	}

	fn restore(&mut self, saved: &SavedPage) {
		self.injected = None;
		self.title = saved.title().to_string();
	}
}

fn parse_title(markup: &str) -> String {
	document_title(&Html::parse_document(markup))
}

fn with_title(markup: &str, title: &str) -> String {
	let escaped = html_escape::encode_text(title);
	if TITLE_RE.is_match(markup) {
		return TITLE_RE.replace(markup, |caps: &regex_lite::Captures| format!("{}{}{}", &caps[1], escaped, &caps[3])).into_owned();
	}
	let mut out = markup.to_string();
	insert_before_close(&mut out, "</head>", &format!("<title>{escaped}</title>"));
	out
}

/// Inserts `fragment` before the last `close` tag, or appends it when there is none.
fn insert_before_close(markup: &mut String, close: &str, fragment: &str) {
	match markup.to_ascii_lowercase().rfind(close) {
		Some(at) => markup.insert_str(at, fragment),
		None => markup.push_str(fragment),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ReaderConfig;
	use crate::extract::extract_article;

	const PAGE: &str = "<html><head><title>Original</title></head><body><article><p>Hello</p></article></body></html>";

	fn reading_view() -> ReadingView {
		ReadingView::from_article(&extract_article(PAGE, None).unwrap(), &ReaderConfig::default())
	}

	#[test]
	fn present_injects_before_closing_tags() {
		let mut page = HtmlPage::new(PAGE, None);
		page.present(&reading_view()).unwrap();
		let rendered = page.render();
		let container = rendered.find("<div id=\"reader-container\"").unwrap();
		let button = rendered.find("<button id=\"reader-back-btn\"").unwrap();
		let filter = rendered.find("<style id=\"eink-filter-style\">").unwrap();
		assert!(container < button && button < rendered.find("</body>").unwrap());
		assert!(filter > rendered.find("</body>").unwrap() && filter < rendered.find("</html>").unwrap());
	}

	#[test]
	fn restore_renders_original_markup() {
		let mut page = HtmlPage::new(PAGE, None);
		let saved = page.save();
		page.present(&reading_view()).unwrap();
		page.set_title("Changed while reading");
		page.restore(&saved);
		assert_eq!(page.render(), PAGE);
		assert_eq!(page.title(), "Original");
	}

	#[test]
	fn title_changes_are_rendered() {
		let mut page = HtmlPage::new(PAGE, None);
		page.set_title("A & B");
		assert!(page.render().contains("<title>A &amp; B</title>"));

		let mut untitled = HtmlPage::new("<html><head></head><body><p>x</p></body></html>", None);
		untitled.set_title("New");
		assert!(untitled.render().contains("<head><title>New</title></head>"));
	}

	#[test]
	fn title_ignores_svg_titles() {
		let page = HtmlPage::new("<html><head></head><body><svg><title>Icon</title></svg><p>x</p></body></html>", None);
		assert_eq!(page.title(), "");
	}

	#[test]
	fn presenting_twice_is_rejected() {
		let mut page = HtmlPage::new(PAGE, None);
		page.present(&reading_view()).unwrap();
		assert!(page.present(&reading_view()).is_err());
	}
}
