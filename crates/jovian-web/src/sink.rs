use js_sys::{Array, Function};
use wasm_bindgen::JsValue;

use jovian_engine::{UniformSink, UniformValue};

/// Forwards uniform writes to a JS callback `(name, x, y, z)`.
///
/// Floats use `x` only; vectors and colors use all three. The JS side
/// registers the callback once its material exists, so the sink is always
/// ready.
pub struct JsUniformSink {
    callback: Function,
}

impl JsUniformSink {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl UniformSink for JsUniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let [x, y, z] = value.components();
        let args = Array::of4(
            &JsValue::from_str(name),
            &JsValue::from_f64(x as f64),
            &JsValue::from_f64(y as f64),
            &JsValue::from_f64(z as f64),
        );
        if let Err(err) = self.callback.apply(&JsValue::NULL, &args) {
            log::warn!("uniform `{name}`: sink callback threw {err:?}");
        }
    }
}
