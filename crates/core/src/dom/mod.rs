//! Document snapshots and the small DOM toolkit the extractor runs on.
//!
//! Snapshots wrap a `scraper` tree. Removal detaches nodes from the tree, so
//! every walk here starts from the document node and follows parent/child
//! links; the arena-order `Html::select` would still see detached nodes.

mod markup;

use ego_tree::{NodeId, NodeRef};
use html5ever::{namespace_url, ns};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;
use url::Url;

use crate::extract::text::collapse_whitespace;

pub use markup::outer_html;

/// Attribute a live-DOM host sets on snapshot elements whose computed style hides them.
pub const HIDDEN_MARKER_ATTR: &str = "data-inky-hidden";

/// An isolated copy of a page's element tree at one point in time.
///
/// Extraction consumes the snapshot; nothing it does can reach the page the
/// snapshot was taken from.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
	html: Html,
	url: Option<Url>,
}

impl DocumentSnapshot {
	/// Parses page markup. An unparseable `url` is dropped.
	pub fn parse(markup: &str, url: Option<&str>) -> Self {
		let url = url.and_then(|raw| match Url::parse(raw) {
			Ok(url) => Some(url),
			Err(err) => {
				debug!(target = "inky.extract", url = raw, error = %err, "ignoring unparseable snapshot url");
				None
			}
		});
		Self {
			html: Html::parse_document(markup),
			url,
		}
	}

	/// Host of the snapshot URL, the equivalent of `document.domain`.
	pub fn domain(&self) -> Option<&str> {
		self.url.as_ref().and_then(Url::host_str).filter(|host| !host.is_empty())
	}

	pub(crate) fn html(&self) -> &Html {
		&self.html
	}

	pub(crate) fn html_mut(&mut self) -> &mut Html {
		&mut self.html
	}
}

/// Every element in the subtree rooted at `node`, in document order, `node` included.
pub(crate) fn elements<'a>(node: NodeRef<'a, Node>) -> impl Iterator<Item = ElementRef<'a>> {
	node.descendants().filter_map(ElementRef::wrap)
}

/// Every element attached to the document.
pub(crate) fn document_elements(html: &Html) -> impl Iterator<Item = ElementRef<'_>> {
	elements(html.tree.root())
}

/// First attached element matching `selector`, in document order.
pub(crate) fn select_first<'a>(html: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
	document_elements(html).find(|el| selector.matches(el))
}

/// First attached element matching any of `selectors`, in document order.
pub(crate) fn select_first_any<'a>(html: &'a Html, selectors: &[Selector]) -> Option<ElementRef<'a>> {
	document_elements(html).find(|el| selectors.iter().any(|selector| selector.matches(el)))
}

/// The document body, when the tree still has one.
pub(crate) fn body(html: &Html) -> Option<ElementRef<'_>> {
	document_elements(html).find(|el| el.value().name() == "body")
}

pub(crate) fn element(html: &Html, id: NodeId) -> Option<ElementRef<'_>> {
	html.tree.get(id).and_then(ElementRef::wrap)
}

/// Text of the first HTML `<title>`, stripped and collapsed like `document.title`.
///
/// SVG and MathML titles are element names in another namespace and never count.
pub(crate) fn document_title(html: &Html) -> String {
	document_elements(html)
		.find(|el| el.value().name.ns == ns!(html) && el.value().name() == "title")
		.map(|el| collapse_whitespace(&text_content(el)).trim().to_string())
		.unwrap_or_default()
}

/// Concatenated descendant text, like `textContent`.
pub(crate) fn text_content(el: ElementRef<'_>) -> String {
	el.text().collect()
}

pub(crate) fn has_visible_text(el: ElementRef<'_>) -> bool {
	el.text().any(|chunk| !chunk.trim().is_empty())
}

/// Whether `el` is an image or has one among its descendants.
pub(crate) fn contains_image(el: ElementRef<'_>) -> bool {
	elements(*el).any(|candidate| candidate.value().name() == "img")
}

/// Detaches every node in `ids` that is still attached to the document.
///
/// Returns how many subtrees came off. An id whose ancestor went first is
/// already gone and is not counted again.
pub(crate) fn detach_all(html: &mut Html, ids: impl IntoIterator<Item = NodeId>) -> usize {
	let root = html.tree.root().id();
	let mut removed = 0;
	for id in ids {
		let attached = html
			.tree
			.get(id)
			.is_some_and(|node| node.ancestors().last().is_some_and(|top| top.id() == root));
		if !attached {
			continue;
		}
		if let Some(mut node) = html.tree.get_mut(id) {
			node.detach();
			removed += 1;
		}
	}
	removed
}

/// Whether the element's own style resolves to not displayed, not visible or transparent.
///
/// Only inline declarations, the `hidden` attribute and the host-provided
/// [`HIDDEN_MARKER_ATTR`] are visible in a snapshot.
pub(crate) fn is_hidden(element: &Element) -> bool {
	if element.attr("hidden").is_some() || element.attr(HIDDEN_MARKER_ATTR).is_some() {
		return true;
	}
	let Some(style) = element.attr("style") else {
		return false;
	};
	style.split(';').filter_map(|decl| decl.split_once(':')).any(|(property, value)| {
		let property = property.trim().to_ascii_lowercase();
		let value = value.trim().trim_end_matches("!important").trim().to_ascii_lowercase();
		match property.as_str() {
			"display" => value == "none",
			"visibility" => value == "hidden",
			"opacity" => value.parse::<f32>().is_ok_and(|opacity| opacity == 0.0),
			_ => false,
		}
	})
}
