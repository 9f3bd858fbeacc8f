use std::time::Duration;

use inky::Notifier;
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Window, console};

use crate::timer;

const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; background: rgba(0,0,0,0.8); color: white; \
	padding: 10px 15px; border-radius: 4px; z-index: 2147483648; font-size: 14px;";

/// Shows toasts through the mode script's `window.showEinkToast`, or a fallback element.
pub struct ToastNotifier {
	window: Window,
	duration: Duration,
}

impl ToastNotifier {
	pub fn new(window: Window, duration: Duration) -> Self {
		Self { window, duration }
	}

	fn show(&self, message: &str) -> Result<(), JsValue> {
		let hook = Reflect::get(&self.window, &JsValue::from_str("showEinkToast"))?;
		if let Some(hook) = hook.dyn_ref::<Function>() {
			hook.call1(&self.window, &JsValue::from_str(message))?;
			return Ok(());
		}

		let document = self.window.document().ok_or("document unavailable")?;
		let body = document.body().ok_or("document has no body")?;
		let toast = document.create_element("div")?;
		toast.set_attribute("style", TOAST_STYLE)?;
		toast.set_text_content(Some(message));
		body.append_child(&toast)?;
		timer::set_timeout(&self.window, self.duration, move || toast.remove())?;
		Ok(())
	}
}

impl Notifier for ToastNotifier {
	fn notify(&self, message: &str) {
		if let Err(err) = self.show(message) {
			console::error_2(&JsValue::from_str("Toast error:"), &err);
		}
	}
}
