//! Persisted storage keys shared by the popup, background and content scripts.

/// Key holding the persisted reader flag in `chrome.storage.local`.
pub const READER_ACTIVE_KEY: &str = "readerActive";

/// Prefix applied to keys stored in Safari's `localStorage`.
pub const SAFARI_KEY_PREFIX: &str = "eink_";

/// Returns the Safari `localStorage` key for `key`.
pub fn safari_key(key: &str) -> String {
	format!("{SAFARI_KEY_PREFIX}{key}")
}

/// Encodes a flag the way Safari `localStorage` stores it.
pub fn encode_flag(value: bool) -> &'static str {
	if value { "true" } else { "false" }
}

/// Decodes a Safari `localStorage` flag. Anything but `"true"`/`"false"` is unset.
pub fn decode_flag(raw: Option<&str>) -> Option<bool> {
	match raw? {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn safari_key_is_prefixed() {
		assert_eq!(safari_key(READER_ACTIVE_KEY), "eink_readerActive");
	}

	#[test]
	fn flags_decode_strictly() {
		assert_eq!(decode_flag(Some(encode_flag(true))), Some(true));
		assert_eq!(decode_flag(Some("false")), Some(false));
		assert_eq!(decode_flag(Some("null")), None);
		assert_eq!(decode_flag(None), None);
	}
}
