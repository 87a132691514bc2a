use wasm_bindgen::prelude::*;

mod scene;

jovian_web::export_scene!(scene::jupiter, "jupiter");
