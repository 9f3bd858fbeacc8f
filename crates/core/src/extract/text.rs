//! Plain-text rendering of article markup.

use std::sync::LazyLock;

use regex_lite::Regex;
use scraper::{ElementRef, Html, Node};

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("MULTI_SPACE regex should compile"));

const BLOCK_ELEMENTS: &[&str] = &[
	"address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li",
	"main", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Collapse runs of whitespace into single spaces.
pub(crate) fn collapse_whitespace(s: &str) -> String {
	MULTI_SPACE.replace_all(s, " ").into_owned()
}

/// Renders article markup as plain text, one line per block element.
pub fn markup_to_text(markup: &str) -> String {
	let fragment = Html::parse_fragment(markup);
	let mut raw = String::new();
	push_text(fragment.root_element(), &mut raw);

	raw.lines()
		.map(|line| collapse_whitespace(line).trim().to_string())
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join("\n")
}

fn push_text(el: ElementRef<'_>, out: &mut String) {
	let block = BLOCK_ELEMENTS.contains(&el.value().name());
	if block {
		out.push('\n');
	}
	for child in el.children() {
		match child.value() {
			Node::Text(text) => {
				let text: &str = text;
				out.push_str(&text.replace('\n', " "));
			}
			Node::Element(_) => {
				if let Some(child_el) = ElementRef::wrap(child) {
					push_text(child_el, out);
				}
			}
			_ => {}
		}
	}
	if block {
		out.push('\n');
	}
}
