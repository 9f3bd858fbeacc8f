//! Article extraction and reader mode for the Inky e-ink extension.
//!
//! The crate has two halves. [`Extractor`] turns a [`DocumentSnapshot`] into
//! an [`Article`] (title, byline, cleaned content markup). [`ReaderSession`]
//! is the two-state machine that swaps a page for a [`ReadingView`] of that
//! article and back, driven per page by a [`ReaderController`].
//!
//! Pages are reached through the [`PageView`] trait. [`HtmlPage`] implements
//! it over plain markup; the browser content script implements it over the
//! live DOM.

mod article;
mod config;
mod dom;
mod error;
mod extract;
mod page;
mod session;
mod view;

pub use article::Article;
pub use config::{Messages, ReaderConfig};
pub use dom::{DocumentSnapshot, HIDDEN_MARKER_ATTR, outer_html};
pub use error::{ExtractionFailure, PageError, ReaderError, Result, RulesError, StoreError};
pub use extract::{Extractor, ExtractorRules, extract_article, markup_to_text};
pub use page::{HtmlPage, PageView, SavedPage};
pub use session::{
	HostBridge, LogNotifier, MemoryStateStore, NoopBridge, Notifier, ReaderController, ReaderControllerBuilder, ReaderSession, StateStore, Transition,
};
pub use view::ReadingView;

pub use inky_protocol as protocol;
