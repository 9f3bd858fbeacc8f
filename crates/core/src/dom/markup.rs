//! Markup serialization for cleaned article subtrees.
//!
//! Inline `style` attributes and the hidden marker are never written, which is
//! how the noise filter's "strip inline styles" step lands in the output.

use std::io;

use ego_tree::iter::Edge;
use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{QualName, namespace_url, ns};
use scraper::{ElementRef, Node};
use tracing::warn;

use super::HIDDEN_MARKER_ATTR;

const DROPPED_ATTRIBUTES: &[&str] = &["style", HIDDEN_MARKER_ATTR];

/// Serializes `el` and its subtree, like `outerHTML` minus presentational noise.
pub fn outer_html(el: ElementRef<'_>) -> String {
	let mut out = Vec::new();
	let opts = SerializeOpts {
		traversal_scope: TraversalScope::IncludeNode,
		..Default::default()
	};
	if let Err(err) = html5ever::serialize(&mut out, &Presentable(el), opts) {
		warn!(target = "inky.extract", error = %err, "article serialization stopped early");
	}
	String::from_utf8_lossy(&out).into_owned()
}

/// An element subtree as the reader shows it.
struct Presentable<'a>(ElementRef<'a>);

impl Serialize for Presentable<'_> {
	fn serialize<S: Serializer>(&self, serializer: &mut S, _scope: TraversalScope) -> io::Result<()> {
		for edge in self.0.traverse() {
			match edge {
				Edge::Open(node) => match node.value() {
					Node::Element(element) => {
						let attrs = element.attrs.iter().filter(|(name, _)| !is_dropped(name)).map(|(name, value)| (name, &value[..]));
						serializer.start_elem(element.name.clone(), attrs)?;
					}
					Node::Text(text) => serializer.write_text(text)?,
					Node::Comment(comment) => serializer.write_comment(comment)?,
					_ => {}
				},
				Edge::Close(node) => {
					if let Some(element) = node.value().as_element() {
						serializer.end_elem(element.name.clone())?;
					}
				}
			}
		}
		Ok(())
	}
}

fn is_dropped(name: &QualName) -> bool {
	name.ns == ns!() && DROPPED_ATTRIBUTES.iter().any(|dropped| name.local.as_ref().eq_ignore_ascii_case(dropped))
}

#[cfg(test)]
mod tests {
	use scraper::Html;

	use super::*;
	use crate::dom::document_elements;

	fn serialize_first(markup: &str, tag: &str) -> String {
		let html = Html::parse_document(markup);
		let el = document_elements(&html).find(|el| el.value().name() == tag).unwrap();
		outer_html(el)
	}

	#[test]
	fn drops_inline_styles_and_keeps_other_attributes() {
		let out = serialize_first(r#"<div class="lead" style="color:red"><a href="/x?a=1&amp;b=2">link</a></div>"#, "div");
		assert_eq!(out, r#"<div class="lead"><a href="/x?a=1&amp;b=2">link</a></div>"#);
	}

	#[test]
	fn escapes_text_and_leaves_void_elements_open() {
		let out = serialize_first("<p>1 &lt; 2 &amp; <br>3<img alt='\"q\"'></p>", "p");
		assert_eq!(out, r#"<p>1 &lt; 2 &amp; <br>3<img alt="&quot;q&quot;"></p>"#);
	}

	#[test]
	fn keeps_namespace_prefixes_on_foreign_attributes() {
		let out = serialize_first(r##"<p>See <svg><a xlink:href="#fig"><text>figure</text></a></svg></p>"##, "p");
		assert_eq!(out, r##"<p>See <svg><a xlink:href="#fig"><text>figure</text></a></svg></p>"##);
	}

	#[test]
	fn drops_the_hidden_marker() {
		let out = serialize_first(r#"<ul><li data-inky-hidden="">gone from view</li></ul>"#, "ul");
		assert_eq!(out, "<ul><li>gone from view</li></ul>");
	}

	#[test]
	fn keeps_comments() {
		let out = serialize_first("<section><!-- note --><p>x</p></section>", "section");
		assert_eq!(out, "<section><!-- note --><p>x</p></section>");
	}
}
