use crate::{QuantileOptions, jenks, quantile_breaks};
use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// Convert breaks to an Array suitable for use by a JS function
fn vec_to_js_array(data: Vec<f64>) -> Array {
    let array = Array::new();
    for num in data {
        array.push(&JsValue::from_f64(num));
    }
    array
}

/// Natural breaks, or `null` when they aren't computable
#[wasm_bindgen]
pub fn jenks_wasm(data: &[f64], nclasses: usize) -> JsValue {
    match jenks(data, nclasses) {
        Some(breaks) => vec_to_js_array(breaks).into(),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen]
pub fn quantile_wasm(
    data: &[f64],
    nb: usize,
    precision: Option<i32>,
    minmax: bool,
) -> Result<Array, JsError> {
    let options = QuantileOptions {
        nb,
        precision,
        minmax,
    };
    let breaks = quantile_breaks(data, &options).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(vec_to_js_array(breaks))
}
