pub mod runner;
pub mod sink;

pub use runner::SceneRunner;
pub use sink::JsUniformSink;
pub use js_sys;
pub use log;
pub use console_log;
pub use console_error_panic_hook;

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene lifecycle, sink attachment, controls, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod scene;
///
/// jovian_web::export_scene!(scene::jupiter, "jupiter");
/// ```
///
/// # Arguments
///
/// - `$config_fn`: Path to a `fn() -> jovian_engine::SceneConfig`
/// - `$scene_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_scene {
    ($config_fn:path, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);

            let mut runner = $crate::SceneRunner::new($config_fn());
            match runner.init() {
                Ok(()) => $crate::log::info!("{}: initialized", $scene_name),
                Err(err) => $crate::log::error!("{}: {}", $scene_name, err),
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
        }

        #[wasm_bindgen]
        pub fn scene_tick(delta: f64) {
            with_runner(|r| r.tick(delta));
        }

        #[wasm_bindgen]
        pub fn scene_attach(body_name: &str, callback: $crate::js_sys::Function) -> bool {
            with_runner(|r| r.attach(body_name, Box::new($crate::JsUniformSink::new(callback)))).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn scene_detach(body_name: &str) -> bool {
            with_runner(|r| r.detach(body_name)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn scene_set_control(name: &str, value: f32) -> f32 {
            with_runner(|r| r.set_control(name, value)).unwrap_or(f32::NAN)
        }

        #[wasm_bindgen]
        pub fn get_manifest_json() -> String {
            with_runner(|r| r.manifest_json().to_string()).unwrap_or_default()
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_transforms_ptr() -> *const f32 {
            with_runner(|r| r.transforms_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_elapsed() -> f64 {
            with_runner(|r| r.elapsed()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_sun_x() -> f32 {
            with_runner(|r| r.sun_x()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_sun_y() -> f32 {
            with_runner(|r| r.sun_y()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_sun_z() -> f32 {
            with_runner(|r| r.sun_z()).unwrap_or(0.0)
        }
    };
}
