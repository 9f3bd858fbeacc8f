//! The two-state reader session.

use std::mem;

use tracing::debug;

use crate::article::Article;
use crate::config::ReaderConfig;
use crate::error::{ExtractionFailure, ReaderError, Result, RulesError};
use crate::extract::Extractor;
use crate::page::{PageView, SavedPage};
use crate::view::ReadingView;

#[derive(Debug, Default)]
enum SessionState {
	#[default]
	Inactive,
	/// The saved page lives exactly as long as reader mode is active.
	Active { saved: SavedPage, article: Article },
}

/// Direction of a completed toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
	Activated,
	Deactivated,
}

impl Transition {
	/// Whether reader mode is active after this transition.
	pub fn is_active(self) -> bool {
		matches!(self, Transition::Activated)
	}
}

/// Reader-mode state machine for one page context.
///
/// Transitions are synchronous: extraction and page mutation finish before
/// [`ReaderSession::toggle`] returns, so no intermediate state is observable.
#[derive(Debug, Default)]
pub struct ReaderSession {
	state: SessionState,
}

impl ReaderSession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_active(&self) -> bool {
		matches!(self.state, SessionState::Active { .. })
	}

	pub fn current_article(&self) -> Option<&Article> {
		match &self.state {
			SessionState::Active { article, .. } => Some(article),
			SessionState::Inactive => None,
		}
	}

	pub fn saved_page(&self) -> Option<&SavedPage> {
		match &self.state {
			SessionState::Active { saved, .. } => Some(saved),
			SessionState::Inactive => None,
		}
	}

	/// Flips reader mode on `page`.
	///
	/// A failed activation leaves the session inactive and the page untouched.
	pub fn toggle<P>(&mut self, page: &mut P, extractor: Result<&Extractor, &RulesError>, config: &ReaderConfig) -> Result<Transition>
	where
		P: PageView + ?Sized,
	{
		match mem::take(&mut self.state) {
			SessionState::Inactive => {
				let (saved, article) = activate(page, extractor, config)?;
				self.state = SessionState::Active { saved, article };
				Ok(Transition::Activated)
			}
			SessionState::Active { saved, .. } => {
				page.restore(&saved);
				debug!(target = "inky.session", title = saved.title(), "restored original page");
				Ok(Transition::Deactivated)
			}
		}
	}
}

fn activate<P>(page: &mut P, extractor: Result<&Extractor, &RulesError>, config: &ReaderConfig) -> Result<(SavedPage, Article)>
where
	P: PageView + ?Sized,
{
	let extractor = extractor.map_err(ReaderError::from)?;
	let saved = page.save();
	let snapshot = page.snapshot().map_err(|err| ExtractionFailure::Internal(err.to_string()))?;
	let article = extractor.extract(snapshot)?;

	let view = ReadingView::from_article(&article, config);
	if let Err(err) = page.present(&view) {
		page.restore(&saved);
		return Err(err.into());
	}
	debug!(target = "inky.session", title = article.title(), "presented reading view");
	Ok((saved, article))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::page::HtmlPage;

	const PAGE: &str = "<html><head><title>Page</title></head><body><article><p>Words</p></article></body></html>";

	#[test]
	fn active_state_owns_saved_page_and_article() {
		let extractor = Extractor::with_embedded_rules().unwrap();
		let config = ReaderConfig::default();
		let mut page = HtmlPage::new(PAGE, None);
		let mut session = ReaderSession::new();

		assert_eq!(session.toggle(&mut page, Ok(&extractor), &config).unwrap(), Transition::Activated);
		assert_eq!(session.saved_page().map(SavedPage::markup), Some(PAGE));
		assert_eq!(session.current_article().map(Article::title), Some("Page"));

		assert_eq!(session.toggle(&mut page, Ok(&extractor), &config).unwrap(), Transition::Deactivated);
		assert!(session.saved_page().is_none());
		assert!(session.current_article().is_none());
	}

	#[test]
	fn unavailable_extractor_aborts_before_touching_the_page() {
		let config = ReaderConfig::default();
		let mut page = HtmlPage::new(PAGE, None);
		let mut session = ReaderSession::new();
		let rules_error = RulesError::Selector {
			rule: "content",
			selector: "[".to_string(),
			reason: "unexpected end of input".to_string(),
		};

		let err = session.toggle(&mut page, Err(&rules_error), &config).unwrap_err();
		assert!(matches!(err, ReaderError::ComponentUnavailable(_)));
		assert!(!session.is_active());
		assert!(!page.is_presenting());
	}
}
