//! Per-page owner of the reader session and its collaborators.

use std::time::Duration;

use inky_protocol::{ActiveStatus, ReaderRequest, ReaderResponse, ToggleOutcome};
use tracing::{debug, info, warn};

use super::host::{HostBridge, LogNotifier, MemoryStateStore, NoopBridge, Notifier, StateStore};
use super::machine::ReaderSession;
use crate::article::Article;
use crate::config::ReaderConfig;
use crate::error::RulesError;
use crate::extract::Extractor;
use crate::page::PageView;

/// Builder for [`ReaderController`].
pub struct ReaderControllerBuilder<P: PageView> {
	page: P,
	config: ReaderConfig,
	notifier: Box<dyn Notifier>,
	store: Box<dyn StateStore>,
	bridge: Box<dyn HostBridge>,
}

impl<P: PageView> ReaderControllerBuilder<P> {
	pub fn config(mut self, config: ReaderConfig) -> Self {
		self.config = config;
		self
	}

	pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
		self.notifier = Box::new(notifier);
		self
	}

	pub fn store(mut self, store: impl StateStore + 'static) -> Self {
		self.store = Box::new(store);
		self
	}

	pub fn bridge(mut self, bridge: impl HostBridge + 'static) -> Self {
		self.bridge = Box::new(bridge);
		self
	}

	/// Compiles the extraction rules and assembles the controller.
	///
	/// Invalid rules do not fail the build; every activation attempt reports
	/// the components as unavailable instead.
	pub fn build(self) -> ReaderController<P> {
		let extractor = match &self.config.rules {
			Some(rules) => Extractor::new(rules),
			None => Extractor::with_embedded_rules(),
		};
		if let Err(err) = &extractor {
			warn!(target = "inky.session", error = %err, "extraction rules unavailable");
		}

		ReaderController {
			page: self.page,
			session: None,
			extractor,
			config: self.config,
			notifier: self.notifier,
			store: self.store,
			bridge: self.bridge,
		}
	}
}

/// Reader mode for a single page context.
///
/// Holds the page view, the session (created on first toggle), the extractor
/// and the host collaborators. All failures stop here: they become a toast and
/// an unsuccessful [`ToggleOutcome`].
pub struct ReaderController<P: PageView> {
	page: P,
	session: Option<ReaderSession>,
	extractor: Result<Extractor, RulesError>,
	config: ReaderConfig,
	notifier: Box<dyn Notifier>,
	store: Box<dyn StateStore>,
	bridge: Box<dyn HostBridge>,
}

impl<P: PageView> ReaderController<P> {
	pub fn builder(page: P) -> ReaderControllerBuilder<P> {
		ReaderControllerBuilder {
			page,
			config: ReaderConfig::default(),
			notifier: Box::new(LogNotifier),
			store: Box::new(MemoryStateStore::default()),
			bridge: Box::new(NoopBridge),
		}
	}

	/// Controller with default configuration and in-process collaborators.
	pub fn new(page: P) -> Self {
		Self::builder(page).build()
	}

	pub fn toggle(&mut self) -> ToggleOutcome {
		let session = self.session.get_or_insert_with(ReaderSession::new);
		match session.toggle(&mut self.page, self.extractor.as_ref(), &self.config) {
			Ok(transition) => {
				let active = transition.is_active();
				if let Err(err) = self.store.set_reader_active(active) {
					warn!(target = "inky.session", error = %err, "failed to persist reader state");
				}
				let messages = &self.config.messages;
				self.notifier.notify(if active { &messages.enabled } else { &messages.disabled });
				self.bridge.notify_state_changed(active);
				info!(target = "inky.session", active, "reader mode toggled");
				ToggleOutcome { success: true, active }
			}
			Err(err) => {
				warn!(target = "inky.session", code = err.code(), error = %err, "reader toggle failed");
				self.notifier.notify(err.toast(&self.config.messages));
				ToggleOutcome {
					success: false,
					active: session.is_active(),
				}
			}
		}
	}

	pub fn is_active(&self) -> bool {
		self.session.as_ref().is_some_and(ReaderSession::is_active)
	}

	/// Answers one inbound host request.
	pub fn handle(&mut self, request: ReaderRequest) -> ReaderResponse {
		debug!(target = "inky.session", ?request, "handling request");
		match request {
			ReaderRequest::ToggleReader => ReaderResponse::Toggled(self.toggle()),
			ReaderRequest::IsReaderActive => self.status(),
			ReaderRequest::ForceApply { reader_active } => {
				if let Some(desired) = reader_active {
					self.ensure_active(desired);
				}
				self.status()
			}
		}
	}

	/// Toggles only when the current state differs from `desired`.
	pub fn ensure_active(&mut self, desired: bool) -> Option<ToggleOutcome> {
		(self.is_active() != desired).then(|| self.toggle())
	}

	/// Delay before activating reader mode on load, if the flag was persisted.
	pub fn startup_delay(&self, persisted: bool) -> Option<Duration> {
		persisted.then(|| self.config.activation_delay())
	}

	/// Like [`startup_delay`](Self::startup_delay) with the flag read from the store.
	pub fn startup_delay_from_store(&self) -> Option<Duration> {
		self.startup_delay(self.store.reader_active().unwrap_or(false))
	}

	/// The deferred activation scheduled by the start-up check.
	pub fn activate_deferred(&mut self) -> Option<ToggleOutcome> {
		if self.is_active() {
			debug!(target = "inky.session", "deferred activation skipped, already active");
			return None;
		}
		self.ensure_active(true)
	}

	pub fn current_article(&self) -> Option<&Article> {
		self.session.as_ref().and_then(ReaderSession::current_article)
	}

	pub fn config(&self) -> &ReaderConfig {
		&self.config
	}

	pub fn page(&self) -> &P {
		&self.page
	}

	pub fn page_mut(&mut self) -> &mut P {
		&mut self.page
	}

	pub fn into_page(self) -> P {
		self.page
	}

	fn status(&self) -> ReaderResponse {
		ReaderResponse::Status(ActiveStatus { active: self.is_active() })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::page::HtmlPage;

	const PAGE: &str = "<html><head><title>Page</title></head><body><article><p>Words</p></article></body></html>";

	#[test]
	fn session_is_created_on_first_toggle() {
		let mut controller = ReaderController::new(HtmlPage::new(PAGE, None));
		assert!(controller.session.is_none());
		assert!(!controller.is_active());

		assert_eq!(controller.toggle(), ToggleOutcome { success: true, active: true });
		assert!(controller.session.is_some());
		assert!(controller.page().is_presenting());
	}

	#[test]
	fn startup_delay_uses_activation_delay() {
		let controller = ReaderController::new(HtmlPage::new(PAGE, None));
		assert_eq!(controller.startup_delay(true), Some(Duration::from_millis(1000)));
		assert_eq!(controller.startup_delay(false), None);
		assert_eq!(controller.startup_delay_from_store(), None);
	}

	#[test]
	fn stored_flag_drives_startup_delay() {
		let controller = ReaderController::builder(HtmlPage::new(PAGE, None))
			.store(MemoryStateStore::with_reader_active(true))
			.build();
		assert_eq!(controller.startup_delay_from_store(), Some(Duration::from_millis(1000)));
	}
}
