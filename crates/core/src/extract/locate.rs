//! Main-content location with a strict fallback order.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use crate::dom::{body, elements, select_first};
use crate::error::ExtractionFailure;
use crate::extract::rules::CompiledRules;

/// How the main content element was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
	/// Matched the content selector at this priority index.
	Selector(usize),
	/// Densest paragraph container, with its paragraph count.
	ParagraphDensity(usize),
	Body,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Located {
	pub(crate) id: NodeId,
	pub(crate) strategy: Strategy,
}

/// Picks the article root: semantic selectors, then paragraph density, then the body.
pub(crate) fn locate_main_content(html: &Html, rules: &CompiledRules) -> Result<Located, ExtractionFailure> {
	for (rank, selector) in rules.content.iter().enumerate() {
		if let Some(el) = select_first(html, selector) {
			return Ok(Located {
				id: el.id(),
				strategy: Strategy::Selector(rank),
			});
		}
	}

	let body = body(html).ok_or(ExtractionFailure::NoContentFound)?;
	if let Some((el, count)) = densest_paragraph_container(body, rules.min_paragraphs) {
		return Ok(Located {
			id: el.id(),
			strategy: Strategy::ParagraphDensity(count),
		});
	}

	Ok(Located {
		id: body.id(),
		strategy: Strategy::Body,
	})
}

/// Element under `body` with the strictly highest paragraph count above `threshold`.
///
/// Ties keep the first element in document order, which favors outer wrappers.
fn densest_paragraph_container(body: ElementRef<'_>, threshold: usize) -> Option<(ElementRef<'_>, usize)> {
	let mut best = None;
	let mut highest = 0;
	for candidate in elements(*body).skip(1) {
		let count = paragraph_count(candidate);
		if count > highest && count > threshold {
			highest = count;
			best = Some((candidate, count));
		}
	}
	best
}

fn paragraph_count(el: ElementRef<'_>) -> usize {
	elements(*el).skip(1).filter(|descendant| descendant.value().name() == "p").count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::element;
	use crate::extract::ExtractorRules;

	fn locate(markup: &str) -> (Html, Located) {
		let html = Html::parse_document(markup);
		let rules = CompiledRules::compile(ExtractorRules::embedded()).unwrap();
		let located = locate_main_content(&html, &rules).unwrap();
		(html, located)
	}

	fn attr_of(html: &Html, located: &Located, attr: &str) -> Option<String> {
		element(html, located.id).and_then(|el| el.value().attr(attr).map(str::to_string))
	}

	#[test]
	fn selector_priority_beats_document_order() {
		let (html, located) = locate("<body><div class='content' id='first'><p>a</p></div><article id='second'><p>b</p></article></body>");
		assert_eq!(located.strategy, Strategy::Selector(0));
		assert_eq!(attr_of(&html, &located, "id").as_deref(), Some("second"));
	}

	#[test]
	fn role_main_precedes_class_heuristics() {
		let (html, located) = locate("<body><div class='post' id='post'></div><div role='main' id='main'></div></body>");
		assert_eq!(located.strategy, Strategy::Selector(1));
		assert_eq!(attr_of(&html, &located, "id").as_deref(), Some("main"));
	}

	#[test]
	fn class_match_is_token_based() {
		let (_, located) = locate("<body><div class='contentious'><p>a</p><p>b</p><p>c</p></div></body>");
		assert_eq!(located.strategy, Strategy::ParagraphDensity(3));
	}

	#[test]
	fn density_picks_first_of_equal_wrappers() {
		let (html, located) = locate("<body><div id='outer'><div id='inner'><p>1</p><p>2</p><p>3</p></div></div><div id='other'><p>x</p><p>y</p><p>z</p></div></body>");
		assert_eq!(located.strategy, Strategy::ParagraphDensity(3));
		assert_eq!(attr_of(&html, &located, "id").as_deref(), Some("outer"));
	}

	#[test]
	fn density_needs_more_than_two_paragraphs() {
		let (html, located) = locate("<body><div id='two'><p>1</p><p>2</p></div></body>");
		assert_eq!(located.strategy, Strategy::Body);
		assert_eq!(element(&html, located.id).map(|el| el.value().name().to_string()).as_deref(), Some("body"));
	}
}
