//! Extraction rules loaded from `rules.json`.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

static EMBEDDED: LazyLock<ExtractorRules> = LazyLock::new(|| {
	let json = include_str!("../rules.json");
	serde_json::from_str(json).expect("Failed to parse rules.json")
});

/// Selector lists driving each extraction stage.
///
/// `content` is tried in priority order; every other list matches its first
/// element in document order, like a selector group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractorRules {
	/// Elements dropped before anything else looks at the tree.
	pub noise: Vec<String>,
	/// Structural noise: navigation, chrome, asides and hidden landmarks.
	pub unlikely: Vec<String>,
	/// Semantic main-content selectors, highest priority first.
	///
	/// Each selector is tried on its own, in list order, so an earlier entry
	/// wins even when a later one matches an element enclosing it. This is not
	/// the same as one grouped query, which would return whichever match comes
	/// first in the document.
	pub content: Vec<String>,
	/// A paragraph-density candidate needs strictly more paragraphs than this.
	pub min_paragraphs: usize,
	pub title_meta: Vec<String>,
	pub byline: Vec<String>,
	pub excerpt: Vec<String>,
	pub site_name_meta: Vec<String>,
	pub published: Vec<String>,
}

impl ExtractorRules {
	/// Rules shipped with the crate.
	pub fn embedded() -> &'static ExtractorRules {
		&EMBEDDED
	}

	pub fn from_json(json: &str) -> Result<Self, RulesError> {
		Ok(serde_json::from_str(json)?)
	}
}

impl Default for ExtractorRules {
	fn default() -> Self {
		Self::embedded().clone()
	}
}

/// [`ExtractorRules`] with every selector parsed.
#[derive(Debug)]
pub(crate) struct CompiledRules {
	pub(crate) noise: Vec<Selector>,
	pub(crate) unlikely: Vec<Selector>,
	pub(crate) content: Vec<Selector>,
	pub(crate) min_paragraphs: usize,
	pub(crate) title_meta: Vec<Selector>,
	pub(crate) byline: Vec<Selector>,
	pub(crate) excerpt: Vec<Selector>,
	pub(crate) site_name_meta: Vec<Selector>,
	pub(crate) published: Vec<Selector>,
}

impl CompiledRules {
	pub(crate) fn compile(rules: &ExtractorRules) -> Result<Self, RulesError> {
		Ok(Self {
			noise: compile_list("noise", &rules.noise)?,
			unlikely: compile_list("unlikely", &rules.unlikely)?,
			content: compile_list("content", &rules.content)?,
			min_paragraphs: rules.min_paragraphs,
			title_meta: compile_list("titleMeta", &rules.title_meta)?,
			byline: compile_list("byline", &rules.byline)?,
			excerpt: compile_list("excerpt", &rules.excerpt)?,
			site_name_meta: compile_list("siteNameMeta", &rules.site_name_meta)?,
			published: compile_list("published", &rules.published)?,
		})
	}

	pub(crate) fn is_noise(&self, el: &ElementRef<'_>) -> bool {
		matches_any(&self.noise, el)
	}

	pub(crate) fn is_unlikely(&self, el: &ElementRef<'_>) -> bool {
		matches_any(&self.unlikely, el)
	}
}

pub(crate) fn matches_any(selectors: &[Selector], el: &ElementRef<'_>) -> bool {
	selectors.iter().any(|selector| selector.matches(el))
}

fn compile_list(rule: &'static str, selectors: &[String]) -> Result<Vec<Selector>, RulesError> {
	selectors
		.iter()
		.map(|raw| {
			Selector::parse(raw).map_err(|err| RulesError::Selector {
				rule,
				selector: raw.clone(),
				reason: err.to_string(),
			})
		})
		.collect()
}
