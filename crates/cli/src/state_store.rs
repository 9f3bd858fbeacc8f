//! Reader flag persisted to a JSON file between CLI invocations.

use std::fs;
use std::path::PathBuf;

use inky::{StateStore, StoreError};
use serde::{Deserialize, Serialize};

const STATE_SCHEMA_VERSION: u32 = 1;

/// On-disk format of a state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateFile {
	pub schema: u32,
	/// Same key the extension uses in `chrome.storage.local`.
	#[serde(default)]
	pub reader_active: Option<bool>,
}

impl Default for StateFile {
	fn default() -> Self {
		Self {
			schema: STATE_SCHEMA_VERSION,
			reader_active: None,
		}
	}
}

/// [`StateStore`] backed by a JSON file, written on every change.
#[derive(Debug)]
pub struct FileStateStore {
	path: PathBuf,
	file: StateFile,
}

impl FileStateStore {
	/// Loads `path`; a missing or unreadable file starts empty.
	pub fn load(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let file = fs::read_to_string(&path)
			.ok()
			.and_then(|content| serde_json::from_str(&content).ok())
			.unwrap_or_default();
		Self { path, file }
	}

	pub fn save(&self) -> Result<(), StoreError> {
		let failed = |err: &dyn std::fmt::Display| StoreError(format!("{}: {err}", self.path.display()));
		if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|err| failed(&err))?;
		}
		let json = serde_json::to_string_pretty(&self.file).map_err(|err| failed(&err))?;
		fs::write(&self.path, json).map_err(|err| failed(&err))
	}
}

impl StateStore for FileStateStore {
	fn reader_active(&self) -> Option<bool> {
		self.file.reader_active
	}

	fn set_reader_active(&mut self, active: bool) -> Result<(), StoreError> {
		self.file.reader_active = Some(active);
		self.save()
	}
}
