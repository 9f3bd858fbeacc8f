//! Structural noise removal.

use ego_tree::NodeId;
use scraper::Html;

use crate::dom::{detach_all, document_elements, element, elements, is_hidden};
use crate::extract::rules::CompiledRules;

/// Removes scripts, styles, unlikely candidates and hidden elements from the whole document.
///
/// Every match is removed unconditionally; there is no scoring.
pub(crate) fn strip_noise(html: &mut Html, rules: &CompiledRules) -> usize {
	let doomed: Vec<NodeId> = document_elements(html)
		.filter(|el| rules.is_noise(el) || rules.is_unlikely(el) || is_hidden(el.value()))
		.map(|el| el.id())
		.collect();
	detach_all(html, doomed)
}

/// Removes unlikely candidates below `root`, leaving `root` itself in place.
pub(crate) fn remove_unlikely_within(html: &mut Html, root: NodeId, rules: &CompiledRules) -> usize {
	let Some(root_el) = element(html, root) else {
		return 0;
	};
	let doomed: Vec<NodeId> = elements(*root_el).skip(1).filter(|el| rules.is_unlikely(el)).map(|el| el.id()).collect();
	detach_all(html, doomed)
}
