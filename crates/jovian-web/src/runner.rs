use jovian_engine::{ConfigError, Orrery, SceneConfig, UniformSink};

/// Scene runner that owns the animation core for the wasm exports.
///
/// Each concrete scene (e.g., `jupiter`) creates a `thread_local!`
/// SceneRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export stateful structs with borrowed callbacks.
/// Until `init` succeeds every call is a no-op.
pub struct SceneRunner {
    config: Option<SceneConfig>,
    orrery: Option<Orrery>,
    /// Cached manifest; the scene layout never changes after init.
    manifest_json: String,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config: Some(config),
            orrery: None,
            manifest_json: String::new(),
        }
    }

    /// Build the scene. Call once after construction.
    pub fn init(&mut self) -> Result<(), ConfigError> {
        let Some(config) = self.config.take() else {
            return Ok(());
        };
        let orrery = Orrery::new(config)?;
        self.manifest_json = orrery.manifest().to_json().map_err(ConfigError::Parse)?;
        self.orrery = Some(orrery);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.orrery.is_some()
    }

    /// Run one render tick.
    pub fn tick(&mut self, delta: f64) {
        if let Some(orrery) = self.orrery.as_mut() {
            orrery.tick(delta);
        }
    }

    pub fn attach(&mut self, body: &str, sink: Box<dyn UniformSink>) -> bool {
        self.orrery
            .as_mut()
            .and_then(|o| o.attach(body, sink))
            .is_some()
    }

    pub fn detach(&mut self, body: &str) -> bool {
        self.orrery.as_mut().is_some_and(|o| o.detach(body))
    }

    /// Returns the applied (clamped) value, or NaN when nothing was applied.
    pub fn set_control(&mut self, name: &str, value: f32) -> f32 {
        self.orrery
            .as_mut()
            .and_then(|o| o.set_control(name, value))
            .unwrap_or(f32::NAN)
    }

    pub fn manifest_json(&self) -> &str {
        &self.manifest_json
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn transforms_ptr(&self) -> *const f32 {
        match &self.orrery {
            Some(o) => o.transforms().instances_ptr(),
            None => std::ptr::null(),
        }
    }

    pub fn body_count(&self) -> u32 {
        self.orrery
            .as_ref()
            .map_or(0, |o| o.transforms().instance_count() as u32)
    }

    pub fn elapsed(&self) -> f64 {
        self.orrery.as_ref().map_or(0.0, Orrery::elapsed)
    }

    pub fn sun_x(&self) -> f32 {
        self.sun()[0]
    }

    pub fn sun_y(&self) -> f32 {
        self.sun()[1]
    }

    pub fn sun_z(&self) -> f32 {
        self.sun()[2]
    }

    fn sun(&self) -> [f32; 3] {
        self.orrery
            .as_ref()
            .map_or([0.0; 3], |o| o.sun().position().to_array())
    }
}
