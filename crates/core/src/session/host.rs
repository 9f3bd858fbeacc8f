//! Collaborators a reader controller talks to, and simple in-process implementations.

use tracing::info;

use crate::error::StoreError;

/// Surfaces transient, toast-style feedback to the user.
pub trait Notifier {
	fn notify(&self, message: &str);
}

/// Persisted "reader active" flag shared with the popup and background script.
pub trait StateStore {
	/// Persisted flag, or `None` when it was never written.
	fn reader_active(&self) -> Option<bool>;

	fn set_reader_active(&mut self, active: bool) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
	fn reader_active(&self) -> Option<bool> {
		(**self).reader_active()
	}

	fn set_reader_active(&mut self, active: bool) -> Result<(), StoreError> {
		(**self).set_reader_active(active)
	}
}

/// Outbound half of the host messaging interface.
///
/// Inbound requests reach the controller through
/// [`ReaderController::handle`](super::ReaderController::handle).
pub trait HostBridge {
	fn notify_state_changed(&self, active: bool);
}

/// Notifier that writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
	fn notify(&self, message: &str) {
		info!(target = "inky.session", %message, "notification");
	}
}

/// State store kept in memory for the lifetime of the page context.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStateStore {
	reader_active: Option<bool>,
}

impl MemoryStateStore {
	pub fn with_reader_active(reader_active: bool) -> Self {
		Self {
			reader_active: Some(reader_active),
		}
	}
}

impl StateStore for MemoryStateStore {
	fn reader_active(&self) -> Option<bool> {
		self.reader_active
	}

	fn set_reader_active(&mut self, active: bool) -> Result<(), StoreError> {
		self.reader_active = Some(active);
		Ok(())
	}
}

/// Bridge for hosts without a messaging layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBridge;

impl HostBridge for NoopBridge {
	fn notify_state_changed(&self, _active: bool) {}
}
