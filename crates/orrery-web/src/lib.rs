pub mod runner;

pub use runner::OrreryRunner;

use std::cell::RefCell;

use orrery_engine::{BodyId, ControlEvent, Locale};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Before `orrery_init` every call is a
/// logged no-op and returns `None`.
fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not initialized, call orrery_init() first");
                None
            }
        }
    })
}

/// Create the simulation. Both arguments are optional JSON documents; bad
/// input is logged and replaced by the built-in defaults.
#[wasm_bindgen]
pub fn orrery_init(config_json: Option<String>, catalog_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = OrreryRunner::from_json(config_json.as_deref(), catalog_json.as_deref());
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
}

/// Advance one frame. `dt` is real seconds since the previous frame.
#[wasm_bindgen]
pub fn orrery_tick(dt: f64) {
    with_runner(|r| r.tick(dt));
}

// ---- Controls ----

#[wasm_bindgen]
pub fn orrery_select(id: u32) {
    with_runner(|r| r.push_control(ControlEvent::Select(BodyId(id))));
}

#[wasm_bindgen]
pub fn orrery_select_by_name(name: &str) {
    with_runner(|r| r.push_control(ControlEvent::SelectByName(name.to_string())));
}

#[wasm_bindgen]
pub fn orrery_deselect() {
    with_runner(|r| r.push_control(ControlEvent::Deselect));
}

#[wasm_bindgen]
pub fn orrery_set_time_multiplier(multiplier: f64) {
    with_runner(|r| r.push_control(ControlEvent::SetTimeMultiplier(multiplier)));
}

/// Switch the dashboard language ("ko" or "en").
#[wasm_bindgen]
pub fn orrery_set_locale(code: &str) {
    match Locale::from_code(code) {
        Some(locale) => {
            with_runner(|r| r.push_control(ControlEvent::SetLocale(locale)));
        }
        None => log::warn!("unknown locale {code:?}"),
    }
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
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count()).unwrap_or(0)
}

/// Focused body id, or -1.
#[wasm_bindgen]
pub fn get_selected() -> i32 {
    with_runner(|r| r.simulation().selected().map(|id| id.0 as i32))
        .flatten()
        .unwrap_or(-1)
}

#[wasm_bindgen]
pub fn get_selected_metrics_json() -> String {
    with_runner(|r| r.selected_metrics_json()).unwrap_or_else(|| "null".to_string())
}

#[wasm_bindgen]
pub fn get_bodies_json() -> String {
    with_runner(|r| r.bodies_json()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_time_multiplier() -> f64 {
    with_runner(|r| r.simulation().clock().multiplier()).unwrap_or(0.0)
}

/// Simulated seconds since start.
#[wasm_bindgen]
pub fn get_sim_elapsed() -> f64 {
    with_runner(|r| r.simulation().clock().sim_elapsed()).unwrap_or(0.0)
}
