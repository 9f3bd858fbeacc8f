//! Persisted reader flag for each host.

use std::cell::Cell;

use inky::protocol::{READER_ACTIVE_KEY, decode_flag, encode_flag, safari_key};
use inky::{MemoryStateStore, StateStore, StoreError};
use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Storage, Window, console};

use crate::bridge::Host;
use crate::js::{call_method, describe};

/// `chrome.storage.local`, written without waiting for completion.
pub struct ChromeStore {
	local: JsValue,
	cached: Cell<Option<bool>>,
}

impl ChromeStore {
	pub fn new(chrome: &JsValue) -> Result<Self, JsValue> {
		let storage = Reflect::get(chrome, &JsValue::from_str("storage"))?;
		let local = Reflect::get(&storage, &JsValue::from_str("local"))?;
		Ok(Self {
			local,
			cached: Cell::new(None),
		})
	}

	/// Reads the persisted flag from `chrome.storage.local`.
	pub async fn load(&self) -> Result<Option<bool>, JsValue> {
		let keys = Array::of1(&JsValue::from_str(READER_ACTIVE_KEY));
		let promise: Promise = call_method(&self.local, "get", &keys)?.dyn_into()?;
		let items = JsFuture::from(promise).await?;
		let value = Reflect::get(&items, &JsValue::from_str(READER_ACTIVE_KEY))?.as_bool();
		self.cached.set(value);
		Ok(value)
	}
}

impl StateStore for ChromeStore {
	fn reader_active(&self) -> Option<bool> {
		self.cached.get()
	}

	fn set_reader_active(&mut self, active: bool) -> Result<(), StoreError> {
		let items = Object::new();
		Reflect::set(&items, &JsValue::from_str(READER_ACTIVE_KEY), &JsValue::from_bool(active)).map_err(store_error)?;
		let result = call_method(&self.local, "set", &items).map_err(store_error)?;
		self.cached.set(Some(active));

		if let Ok(promise) = result.dyn_into::<Promise>() {
			spawn_local(async move {
				if let Err(err) = JsFuture::from(promise).await {
					console::error_2(&JsValue::from_str("Error saving reader state:"), &err);
				}
			});
		}
		Ok(())
	}
}

/// Safari `localStorage` under the `eink_` prefix.
pub struct SafariStore {
	storage: Option<Storage>,
	key: String,
}

impl SafariStore {
	pub fn new(storage: Option<Storage>) -> Self {
		Self {
			storage,
			key: safari_key(READER_ACTIVE_KEY),
		}
	}
}

impl StateStore for SafariStore {
	fn reader_active(&self) -> Option<bool> {
		let storage = self.storage.as_ref()?;
		match storage.get_item(&self.key) {
			Ok(raw) => decode_flag(raw.as_deref()),
			Err(err) => {
				console::error_2(&JsValue::from_str("Error loading reader state:"), &err);
				None
			}
		}
	}

	fn set_reader_active(&mut self, active: bool) -> Result<(), StoreError> {
		let storage = self.storage.as_ref().ok_or_else(|| StoreError("localStorage unavailable".to_string()))?;
		storage.set_item(&self.key, encode_flag(active)).map_err(store_error)
	}
}

fn store_error(err: JsValue) -> StoreError {
	StoreError(describe(&err))
}

/// Store for `host`; hosts without extension storage keep the flag in memory.
pub fn for_host(host: &Host, window: &Window) -> Box<dyn StateStore> {
	match host {
		Host::Chrome(chrome) => match ChromeStore::new(chrome) {
			Ok(store) => Box::new(store),
			Err(err) => {
				console::warn_2(&JsValue::from_str("chrome.storage unavailable:"), &err);
				Box::new(MemoryStateStore::default())
			}
		},
		Host::Safari(_) => Box::new(SafariStore::new(window.local_storage().ok().flatten())),
		Host::Standalone => Box::new(MemoryStateStore::default()),
	}
}

/// The flag persisted by an earlier page, read once at start-up.
pub async fn persisted_reader_active(host: &Host, window: &Window) -> bool {
	let loaded = match host {
		Host::Chrome(chrome) => match ChromeStore::new(chrome) {
			Ok(store) => store.load().await,
			Err(err) => Err(err),
		},
		Host::Safari(_) => Ok(SafariStore::new(window.local_storage().ok().flatten()).reader_active()),
		Host::Standalone => Ok(None),
	};
	match loaded {
		Ok(active) => active.unwrap_or(false),
		Err(err) => {
			console::error_2(&JsValue::from_str("Error loading reader state:"), &err);
			false
		}
	}
}
