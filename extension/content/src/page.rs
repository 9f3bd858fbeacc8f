//! [`PageView`] over the live document.

use inky::{DocumentSnapshot, HIDDEN_MARKER_ATTR, PageError, PageView, ReadingView, SavedPage};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CssStyleDeclaration, Document, Element, NodeList, Window, console};

use crate::js::describe;

/// Ids of the elements a presented reading view added.
#[derive(Debug, Clone)]
struct Injected {
	container_id: String,
	exit_control_id: String,
	filter_style_id: String,
}

pub struct DomPage {
	window: Window,
	document: Document,
	injected: Option<Injected>,
	/// Click handler for the exit control. Lives as long as the page so a
	/// click that deactivates reader mode never drops its own closure.
	exit_listener: Option<Closure<dyn FnMut()>>,
}

impl DomPage {
	pub fn new(window: Window, document: Document) -> Self {
		Self {
			window,
			document,
			injected: None,
			exit_listener: None,
		}
	}

	/// Installs what a click on the exit control runs.
	pub fn set_exit_handler(&mut self, handler: impl FnMut() + 'static) {
		self.exit_listener = Some(Closure::new(handler));
	}

	fn clone_with_hidden_marks(&self) -> Result<Element, JsValue> {
		let root = self.document.document_element().ok_or("document has no root element")?;
		let copy: Element = root.clone_node_with_deep(true)?.dyn_into()?;

		// Head elements compute to `display: none`, so only body content is inspected.
		if let (Some(live_body), Some(copy_body)) = (self.document.body(), copy.query_selector("body")?) {
			mark_hidden(&self.window, &live_body.query_selector_all("*")?, &copy_body.query_selector_all("*")?)?;
		}
		Ok(copy)
	}

	fn inject(&mut self, view: &ReadingView) -> Result<(), JsValue> {
		let body = self.document.body().ok_or("document has no body")?;
		let root = self.document.document_element().ok_or("document has no root element")?;

		body.insert_adjacent_html("beforeend", &view.container_markup())?;
		body.insert_adjacent_html("beforeend", &view.exit_control_markup())?;
		root.insert_adjacent_html("beforeend", &view.filter_markup())?;

		if let (Some(button), Some(listener)) = (self.document.get_element_by_id(&view.exit_control_id), &self.exit_listener) {
			button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
		}
		Ok(())
	}

	fn remove_injected(&self, injected: &Injected) {
		for id in [&injected.container_id, &injected.exit_control_id, &injected.filter_style_id] {
			if let Some(element) = self.document.get_element_by_id(id) {
				element.remove();
			}
		}
	}
}

impl PageView for DomPage {
	fn save(&self) -> SavedPage {
		let markup = self.document.document_element().map(|root| root.outer_html()).unwrap_or_default();
		SavedPage::new(markup, self.document.title())
	}

	fn snapshot(&self) -> Result<DocumentSnapshot, PageError> {
		let copy = self.clone_with_hidden_marks().map_err(host_error)?;
		let url = self.document.url().ok();
		Ok(DocumentSnapshot::parse(&copy.outer_html(), url.as_deref()))
	}

	fn present(&mut self, view: &ReadingView) -> Result<(), PageError> {
		if self.document.body().is_none() {
			return Err(PageError::MissingBody);
		}
		let injected = Injected {
			container_id: view.container_id.clone(),
			exit_control_id: view.exit_control_id.clone(),
			filter_style_id: view.filter_style_id.clone(),
		};
		if let Err(err) = self.inject(view) {
			self.remove_injected(&injected);
			return Err(host_error(err));
		}
		self.injected = Some(injected);
		Ok(())
	}

	fn restore(&mut self, saved: &SavedPage) {
		if let Some(injected) = self.injected.take() {
			self.remove_injected(&injected);
		}
		self.document.set_title(saved.title());
	}
}

fn mark_hidden(window: &Window, live: &NodeList, copy: &NodeList) -> Result<u32, JsValue> {
	let mut marked = 0;
	for index in 0..live.length().min(copy.length()) {
		let (Some(live_el), Some(copy_el)) = (element_at(live, index), element_at(copy, index)) else {
			continue;
		};
		let Some(style) = window.get_computed_style(&live_el)? else {
			continue;
		};
		if computed_hidden(&style) {
			copy_el.set_attribute(HIDDEN_MARKER_ATTR, "")?;
			marked += 1;
		}
	}
	Ok(marked)
}

fn element_at(list: &NodeList, index: u32) -> Option<Element> {
	list.item(index).and_then(|node| node.dyn_into().ok())
}

fn computed_hidden(style: &CssStyleDeclaration) -> bool {
	let value = |property: &str| style.get_property_value(property).unwrap_or_default();
	value("display") == "none" || value("visibility") == "hidden" || value("opacity").parse::<f32>().is_ok_and(|opacity| opacity == 0.0)
}

fn host_error(err: JsValue) -> PageError {
	console::error_2(&JsValue::from_str("Reader page error:"), &err);
	PageError::Host(describe(&err))
}
