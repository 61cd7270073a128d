use orrery_engine::bridge::protocol::events_ptr;
use orrery_engine::{
    Catalog, ControlEvent, SimConfig, Simulation, TransformBuffer,
};

/// Wires the simulation to the flat buffers the page reads.
///
/// The `#[wasm_bindgen]` exports in `lib.rs` keep one runner in a
/// `thread_local!`, because wasm-bindgen cannot export the engine types
/// directly.
pub struct OrreryRunner {
    sim: Simulation,
    transforms: TransformBuffer,
}

impl OrreryRunner {
    pub fn new(sim: Simulation) -> Self {
        let mut transforms = TransformBuffer::new();
        sim.publish(&mut transforms);
        Self { sim, transforms }
    }

    /// Build from optional host JSON. Anything that fails to parse or
    /// validate is logged and replaced by the built-in default.
    pub fn from_json(config_json: Option<&str>, catalog_json: Option<&str>) -> Self {
        let config = match config_json {
            Some(json) => SimConfig::from_json(json).unwrap_or_else(|err| {
                log::error!("{err}; using default config");
                SimConfig::default()
            }),
            None => SimConfig::default(),
        };
        let catalog = match catalog_json {
            Some(json) => Catalog::from_json(json).unwrap_or_else(|err| {
                log::error!("{err}; using built-in catalog");
                Catalog::builtin()
            }),
            None => Catalog::builtin(),
        };
        Self::new(Simulation::from_catalog(&catalog, config))
    }

    pub fn push_control(&mut self, event: ControlEvent) {
        self.sim.push_control(event);
    }

    /// Run one frame tick and republish transforms.
    pub fn tick(&mut self, dt: f64) {
        self.sim.tick(dt);
        self.sim.publish(&mut self.transforms);
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn transforms_ptr(&self) -> *const f32 {
        self.transforms.transforms_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.transforms.body_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        events_ptr(self.sim.events())
    }

    pub fn event_count(&self) -> u32 {
        self.sim.events().len() as u32
    }

    // ---- JSON accessors for the dashboard ----

    pub fn selected_metrics_json(&self) -> String {
        self.sim.selected_metrics_json().unwrap_or_else(|err| {
            log::error!("metrics serialization failed: {err}");
            "null".to_string()
        })
    }

    pub fn bodies_json(&self) -> String {
        self.sim.bodies_json().unwrap_or_else(|err| {
            log::error!("body list serialization failed: {err}");
            "[]".to_string()
        })
    }
}
