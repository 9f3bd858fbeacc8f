//! Empty-wrapper pruning and serialization of the selected content.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use crate::dom::{contains_image, detach_all, element, has_visible_text, outer_html};
use crate::error::ExtractionFailure;
use crate::extract::noise::remove_unlikely_within;
use crate::extract::rules::CompiledRules;

/// Cleans a deep copy of the subtree at `root` and serializes it.
///
/// Fails with [`ExtractionFailure::NoContentFound`] when nothing readable
/// survives: no text and no image.
pub(crate) fn clean_content(html: &Html, root: NodeId, rules: &CompiledRules) -> Result<String, ExtractionFailure> {
	let mut working = html.clone();

	let empty = {
		let root_el = element(&working, root).ok_or_else(|| missing_root(root))?;
		let mut empty = Vec::new();
		collect_empty_descendants(root_el, &mut empty);
		empty
	};
	detach_all(&mut working, empty);
	remove_unlikely_within(&mut working, root, rules);

	let root_el = element(&working, root).ok_or_else(|| missing_root(root))?;
	if !has_visible_text(root_el) && !contains_image(root_el) {
		return Err(ExtractionFailure::NoContentFound);
	}
	Ok(outer_html(root_el))
}

/// Depth-first, post-order pruning of elements with no text and no image.
///
/// Removing an empty child never changes its parent's text or images, so the
/// post-order outcome is the set of outermost empty elements: once a child is
/// found empty its whole subtree goes with it.
fn collect_empty_descendants(el: ElementRef<'_>, out: &mut Vec<NodeId>) {
	for child in el.children().filter_map(ElementRef::wrap) {
		if !has_visible_text(child) && !contains_image(child) {
			out.push(child.id());
		} else {
			collect_empty_descendants(child, out);
		}
	}
}

fn missing_root(root: NodeId) -> ExtractionFailure {
	ExtractionFailure::Internal(format!("content root {root:?} is not an element"))
}
