//! Small `Reflect` helpers for duck-typed extension globals.

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub fn get_path(root: &JsValue, path: &[&str]) -> Result<JsValue, JsValue> {
	path.iter().try_fold(root.clone(), |value, key| Reflect::get(&value, &JsValue::from_str(key)))
}

pub fn has_path(root: &JsValue, path: &[&str]) -> bool {
	get_path(root, path).is_ok_and(|value| !value.is_undefined() && !value.is_null())
}

pub fn call_method(target: &JsValue, name: &str, arg: &JsValue) -> Result<JsValue, JsValue> {
	method(target, name)?.call1(target, arg)
}

pub fn call_method2(target: &JsValue, name: &str, first: &JsValue, second: &JsValue) -> Result<JsValue, JsValue> {
	method(target, name)?.call2(target, first, second)
}

/// Plain JSON-shaped JS object, so `Option::None` becomes `null` and maps become objects.
pub fn to_js(value: &impl Serialize) -> Result<JsValue, JsValue> {
	value
		.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
		.map_err(JsValue::from)
}

pub fn describe(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
	Reflect::get(target, &JsValue::from_str(name))?
		.dyn_into()
		.map_err(|_| JsValue::from_str(&format!("{name} is not a function")))
}
