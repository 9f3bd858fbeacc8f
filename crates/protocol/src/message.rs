//! Requests, responses and notifications understood by the reader content script.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound request addressed to the reader.
///
/// Serialized with an `action` tag, e.g. `{"action":"toggleReader"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ReaderRequest {
	/// Flip reader mode.
	ToggleReader,
	/// Query whether reader mode is active.
	IsReaderActive,
	/// Re-apply persisted state after a navigation completed.
	///
	/// The background script also sends colour-mode fields in this message;
	/// they are not reader concerns and are ignored.
	#[serde(rename_all = "camelCase")]
	ForceApply {
		#[serde(default)]
		reader_active: Option<bool>,
	},
}

impl ReaderRequest {
	/// Parses a raw message, returning `None` for messages meant for other scripts.
	pub fn from_value(value: &Value) -> Option<Self> {
		Self::deserialize(value).ok()
	}

	/// Parses a Safari message event from its name and optional payload.
	pub fn from_event_name(name: &str, payload: Option<&Value>) -> Option<Self> {
		match name {
			"toggleReader" => Some(Self::ToggleReader),
			"isReaderActive" => Some(Self::IsReaderActive),
			"forceApply" => Some(Self::ForceApply {
				reader_active: payload.and_then(|p| p.get("readerActive")).and_then(Value::as_bool),
			}),
			_ => None,
		}
	}
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
	pub success: bool,
	pub active: bool,
}

/// Answer to `isReaderActive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStatus {
	pub active: bool,
}

/// Response sent back for a [`ReaderRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReaderResponse {
	Toggled(ToggleOutcome),
	Status(ActiveStatus),
}

/// Outbound notification emitted after a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ReaderEvent {
	ReaderStateChanged { active: bool },
}

/// Safari event name used to answer `isReaderActive`.
pub const SAFARI_ACTIVE_RESPONSE: &str = "readerActiveResponse";

/// Safari event name used for [`ReaderEvent::ReaderStateChanged`].
pub const SAFARI_STATE_CHANGED: &str = "readerStateChanged";
