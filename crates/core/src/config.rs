//! Reader presentation and timing configuration.
//!
//! Every field has a default matching the shipped extension, so a JSON
//! configuration only needs the keys it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractorRules;

/// Toast strings shown for reader transitions.
///
/// These literals are what users see; hosts may localize them through config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
	pub enabled: String,
	pub disabled: String,
	pub extraction_failed: String,
	pub components_unavailable: String,
	pub presentation_failed: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			enabled: "📝 阅读模式已启用".to_string(),
			disabled: "❌ 阅读模式已关闭".to_string(),
			extraction_failed: "无法提取文章内容".to_string(),
			components_unavailable: "无法加载阅读模式组件".to_string(),
			presentation_failed: "阅读模式初始化失败".to_string(),
		}
	}
}

/// Configuration shared by the reading view, the controller and hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
	/// Id of the full-viewport reading view container.
	pub container_id: String,
	/// Id of the centered column holding title, meta line and content.
	pub content_id: String,
	/// Id of the exit button.
	pub exit_control_id: String,
	pub exit_label: String,
	/// Id of the `<style>` element carrying the page-wide filter.
	pub filter_style_id: String,
	/// CSS filter applied to the whole page while reader mode is active.
	pub page_filter: String,
	/// Delay before a content script reads the persisted reader flag.
	pub startup_check_delay_ms: u64,
	/// Delay before a persisted reader flag re-activates reader mode.
	pub activation_delay_ms: u64,
	pub toast_duration_ms: u64,
	pub messages: Messages,
	/// Replacement extraction rules; the embedded rules are used when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rules: Option<ExtractorRules>,
}

impl Default for ReaderConfig {
	fn default() -> Self {
		Self {
			container_id: "reader-container".to_string(),
			content_id: "reader-content".to_string(),
			exit_control_id: "reader-back-btn".to_string(),
			exit_label: "← 返回".to_string(),
			filter_style_id: "eink-filter-style".to_string(),
			page_filter: "grayscale(1) contrast(1.2) brightness(1.05)".to_string(),
			startup_check_delay_ms: 500,
			activation_delay_ms: 1000,
			toast_duration_ms: 2000,
			messages: Messages::default(),
			rules: None,
		}
	}
}

impl ReaderConfig {
	/// Parses a JSON configuration, filling unspecified keys with defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	pub fn startup_check_delay(&self) -> Duration {
		Duration::from_millis(self.startup_check_delay_ms)
	}

	pub fn activation_delay(&self) -> Duration {
		Duration::from_millis(self.activation_delay_ms)
	}

	pub fn toast_duration(&self) -> Duration {
		Duration::from_millis(self.toast_duration_ms)
	}

	/// CSS rule text applying [`Self::page_filter`] to the document root.
	pub fn filter_css(&self) -> String {
		let filter = &self.page_filter;
		format!(":root{{filter:{filter} !important;-webkit-filter:{filter} !important;}}")
	}
}
