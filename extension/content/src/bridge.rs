//! Extension messaging, chosen once per page from the host the script runs in.

use std::cell::RefCell;
use std::rc::Weak;

use inky::protocol::{ReaderEvent, ReaderRequest, ReaderResponse, SAFARI_ACTIVE_RESPONSE, SAFARI_STATE_CHANGED};
use inky::{HostBridge, ReaderController};
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Window, console};

use crate::js::{call_method, call_method2, get_path, has_path, to_js};
use crate::page::DomPage;

type Controller = RefCell<ReaderController<DomPage>>;

/// The extension runtime a content script is running under.
#[derive(Clone)]
pub enum Host {
	Chrome(JsValue),
	Safari(JsValue),
	/// Loaded without an extension runtime, e.g. injected into a test page.
	Standalone,
}

impl Host {
	/// `window.chrome` wins over `window.safari` when both exist.
	pub fn detect(window: &Window) -> Self {
		let global = |name: &str| {
			Reflect::get(window, &JsValue::from_str(name))
				.ok()
				.filter(|value| !value.is_undefined() && !value.is_null())
		};
		if let Some(chrome) = global("chrome").filter(|chrome| has_path(chrome, &["runtime", "onMessage"])) {
			Host::Chrome(chrome)
		} else if let Some(safari) = global("safari").filter(|safari| has_path(safari, &["self"])) {
			Host::Safari(safari)
		} else {
			Host::Standalone
		}
	}

	/// Routes inbound requests to `controller` for the lifetime of the page.
	pub fn listen(&self, controller: Weak<Controller>) -> Result<(), JsValue> {
		match self {
			Host::Chrome(chrome) => listen_chrome(chrome, controller),
			Host::Safari(safari) => listen_safari(safari, controller),
			Host::Standalone => Ok(()),
		}
	}
}

/// Outbound state notifications for [`Host`].
pub struct ExtensionBridge {
	host: Host,
}

impl ExtensionBridge {
	pub fn new(host: Host) -> Self {
		Self { host }
	}
}

impl HostBridge for ExtensionBridge {
	fn notify_state_changed(&self, active: bool) {
		let result = match &self.host {
			Host::Chrome(chrome) => send_chrome(chrome, &ReaderEvent::ReaderStateChanged { active }),
			Host::Safari(safari) => dispatch_safari(safari, SAFARI_STATE_CHANGED, &ReaderEvent::ReaderStateChanged { active }),
			Host::Standalone => Ok(()),
		};
		if let Err(err) = result {
			console::warn_2(&JsValue::from_str("Reader state notification failed:"), &err);
		}
	}
}

fn listen_chrome(chrome: &JsValue, controller: Weak<Controller>) -> Result<(), JsValue> {
	let on_message = get_path(chrome, &["runtime", "onMessage"])?;
	let listener = Closure::<dyn FnMut(JsValue, JsValue, Function) -> JsValue>::new(move |message: JsValue, _sender: JsValue, send_response: Function| {
		let Some(request) = parse_request(&message) else {
			return JsValue::FALSE;
		};
		let Some(response) = handle(&controller, request) else {
			return JsValue::FALSE;
		};
		if let Err(err) = to_js(&response).and_then(|response| send_response.call1(&JsValue::NULL, &response)) {
			console::error_2(&JsValue::from_str("Reader response failed:"), &err);
		}
		JsValue::TRUE
	});
	call_method(&on_message, "addListener", listener.as_ref())?;
	listener.forget();
	Ok(())
}

fn listen_safari(safari: &JsValue, controller: Weak<Controller>) -> Result<(), JsValue> {
	let target = get_path(safari, &["self"])?;
	let reply_to = safari.clone();
	let listener = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
		let name = Reflect::get(&event, &JsValue::from_str("name")).ok().and_then(|name| name.as_string());
		let payload = Reflect::get(&event, &JsValue::from_str("message"))
			.ok()
			.and_then(|message| serde_wasm_bindgen::from_value::<serde_json::Value>(message).ok());
		let Some(request) = name.and_then(|name| ReaderRequest::from_event_name(&name, payload.as_ref())) else {
			return;
		};
		let answers = matches!(request, ReaderRequest::IsReaderActive);
		let Some(response) = handle(&controller, request) else {
			return;
		};
		if answers {
			if let Err(err) = dispatch_safari(&reply_to, SAFARI_ACTIVE_RESPONSE, &response) {
				console::error_2(&JsValue::from_str("Reader response failed:"), &err);
			}
		}
	});
	call_method2(&target, "addEventListener", &JsValue::from_str("message"), listener.as_ref())?;
	listener.forget();
	Ok(())
}

fn handle(controller: &Weak<Controller>, request: ReaderRequest) -> Option<ReaderResponse> {
	let controller = controller.upgrade()?;
	let mut controller = controller.try_borrow_mut().ok()?;
	Some(controller.handle(request))
}

fn parse_request(message: &JsValue) -> Option<ReaderRequest> {
	let value: serde_json::Value = serde_wasm_bindgen::from_value(message.clone()).ok()?;
	ReaderRequest::from_value(&value)
}

fn send_chrome(chrome: &JsValue, event: &ReaderEvent) -> Result<(), JsValue> {
	let runtime = get_path(chrome, &["runtime"])?;
	let result = call_method(&runtime, "sendMessage", &to_js(event)?)?;
	// Rejects when no extension page is listening.
	if let Ok(promise) = result.dyn_into::<Promise>() {
		spawn_local(async move {
			let _ = JsFuture::from(promise).await;
		});
	}
	Ok(())
}

fn dispatch_safari(safari: &JsValue, name: &str, payload: &impl Serialize) -> Result<(), JsValue> {
	let tab = get_path(safari, &["self", "tab"])?;
	call_method2(&tab, "dispatchMessage", &JsValue::from_str(name), &to_js(payload)?).map(drop)
}
