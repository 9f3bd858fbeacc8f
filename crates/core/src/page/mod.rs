//! The page surface reader mode mutates.
//!
//! Sessions never touch a document directly: they ask a [`PageView`] for a
//! snapshot, hand it a [`ReadingView`] to present, and later give back the
//! [`SavedPage`] to restore. Browsers implement this over the live DOM; the
//! markup-backed [`HtmlPage`] serves the CLI and tests.

mod html;

pub use html::HtmlPage;

use crate::dom::DocumentSnapshot;
use crate::error::PageError;
use crate::view::ReadingView;

/// Opaque copy of the original page taken when reader mode activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
	markup: String,
	title: String,
}

impl SavedPage {
	pub fn new(markup: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			markup: markup.into(),
			title: title.into(),
		}
	}

	/// Serialized document as it was before activation.
	pub fn markup(&self) -> &str {
		&self.markup
	}

	/// Document title before activation.
	pub fn title(&self) -> &str {
		&self.title
	}
}

/// Mutation surface of one page.
pub trait PageView {
	/// Captures the page as it is now, for [`PageView::restore`].
	fn save(&self) -> SavedPage;

	/// Takes a fresh, isolated snapshot of the current document.
	fn snapshot(&self) -> Result<DocumentSnapshot, PageError>;

	/// Injects the reading view, its exit control and the page-wide filter.
	fn present(&mut self, view: &ReadingView) -> Result<(), PageError>;

	/// Removes everything [`PageView::present`] injected and restores the saved title.
	///
	/// Best effort per element: anything already gone is skipped.
	fn restore(&mut self, saved: &SavedPage);
}
