//! Reader session state machine and its per-page controller.

mod controller;
mod host;
mod machine;

pub use controller::{ReaderController, ReaderControllerBuilder};
pub use host::{HostBridge, LogNotifier, MemoryStateStore, NoopBridge, Notifier, StateStore};
pub use machine::{ReaderSession, Transition};
