use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Runs `f` once after `delay`. There is no cancellation.
pub fn set_timeout(window: &Window, delay: Duration, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
	let callback = Closure::once_into_js(f);
	let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
	window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
}
