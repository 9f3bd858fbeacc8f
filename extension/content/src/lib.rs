//! Reader-mode content script for the Inky extension.
//!
//! Loaded into every frame; only the top frame installs a reader. The
//! installed [`ContentScript`] is published as `window.__INKY_READER__` so
//! the mode script can call `toggle()` and `isActive()`.

mod bridge;
mod js;
mod page;
mod store;
mod timer;
mod toast;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use inky::{ReaderConfig, ReaderController};
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Window, console};

use bridge::{ExtensionBridge, Host};
use page::DomPage;
use toast::ToastNotifier;

/// Global the mode script looks up to reach the reader.
pub const READER_GLOBAL: &str = "__INKY_READER__";

type Controller = RefCell<ReaderController<DomPage>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	console_error_panic_hook::set_once();

	let window = web_sys::window().ok_or("no window")?;
	if !is_top_frame(&window) {
		return Ok(());
	}
	let script = ContentScript::install(window.clone(), ReaderConfig::default())?;
	Reflect::set(&window, &JsValue::from_str(READER_GLOBAL), &JsValue::from(script))?;
	Ok(())
}

/// Handle to the reader of this page.
#[wasm_bindgen]
pub struct ContentScript {
	controller: Rc<Controller>,
}

impl ContentScript {
	/// Builds the controller, wires messaging and schedules the start-up check.
	pub fn install(window: Window, config: ReaderConfig) -> Result<Self, JsValue> {
		let document = window.document().ok_or("no document")?;
		let host = Host::detect(&window);

		let notifier = ToastNotifier::new(window.clone(), config.toast_duration());
		let startup_check = config.startup_check_delay();
		let controller = ReaderController::builder(DomPage::new(window.clone(), document))
			.store(store::for_host(&host, &window))
			.notifier(notifier)
			.bridge(ExtensionBridge::new(host.clone()))
			.config(config)
			.build();
		let controller = Rc::new(RefCell::new(controller));

		let exit = Rc::downgrade(&controller);
		controller.borrow_mut().page_mut().set_exit_handler(move || {
			toggle_weak(&exit);
		});
		host.listen(Rc::downgrade(&controller))?;

		let weak = Rc::downgrade(&controller);
		let check_window = window.clone();
		timer::set_timeout(&window, startup_check, move || {
			spawn_local(startup_check_task(check_window, host, weak));
		})?;

		Ok(Self { controller })
	}
}

#[wasm_bindgen]
impl ContentScript {
	/// Flips reader mode; resolves to `{success, active}`.
	pub fn toggle(&self) -> Result<JsValue, JsValue> {
		let outcome = self
			.controller
			.try_borrow_mut()
			.map_err(|_| JsValue::from_str("reader is busy"))?
			.toggle();
		js::to_js(&outcome)
	}

	#[wasm_bindgen(js_name = isActive)]
	pub fn is_active(&self) -> bool {
		self.controller.try_borrow().is_ok_and(|controller| controller.is_active())
	}
}

/// Reads the persisted flag and, when set, schedules the deferred activation.
async fn startup_check_task(window: Window, host: Host, controller: Weak<Controller>) {
	let persisted = store::persisted_reader_active(&host, &window).await;
	let Some(strong) = controller.upgrade() else {
		return;
	};
	let delay = strong.borrow().startup_delay(persisted);
	drop(strong);
	let Some(delay) = delay else {
		return;
	};
	let scheduled = timer::set_timeout(&window, delay, move || {
		if let Some(controller) = controller.upgrade() {
			if let Ok(mut controller) = controller.try_borrow_mut() {
				controller.activate_deferred();
			}
		}
	});
	if let Err(err) = scheduled {
		console::error_2(&JsValue::from_str("Deferred activation failed:"), &err);
	}
}

fn toggle_weak(controller: &Weak<Controller>) {
	if let Some(controller) = controller.upgrade() {
		if let Ok(mut controller) = controller.try_borrow_mut() {
			controller.toggle();
		}
	}
}

/// Cross-origin access to `window.top` throws; such frames are not the top frame.
fn is_top_frame(window: &Window) -> bool {
	match window.top() {
		Ok(Some(top)) => js_sys::Object::is(&top, window),
		_ => false,
	}
}
