use serde::Serialize;

use crate::api::config::SimConfig;
use crate::api::types::{BodyCategory, BodyId, SimEvent};
use crate::assets::catalog::Catalog;
use crate::bridge::protocol::SceneSink;
use crate::core::scene::Scene;
use crate::core::time::{FrameTime, SimClock};
use crate::input::queue::{ControlEvent, ControlQueue};
use crate::systems::format::Locale;
use crate::systems::integrator;
use crate::systems::metrics::MetricsSnapshot;
use crate::systems::populate::populate;
use crate::systems::selection::Selection;

/// Entry of the body list handed to the host page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySummary {
    pub id: BodyId,
    pub name: String,
    pub category: BodyCategory,
    pub parent: Option<BodyId>,
    /// Render radius in scene units.
    pub size: f64,
}

/// Owns the scene and drives it one frame at a time.
///
/// Order within a tick: clear last tick's events, apply queued controls,
/// advance the clock, integrate every body, refresh the focused body's
/// metrics. The host then reads transforms through [`Simulation::publish`].
pub struct Simulation {
    config: SimConfig,
    scene: Scene,
    clock: SimClock,
    controls: ControlQueue,
    selection: Selection,
    locale: Locale,
    events: Vec<SimEvent>,
}

impl Simulation {
    /// Simulation of the built-in solar system.
    pub fn new(config: SimConfig) -> Self {
        Self::from_catalog(&Catalog::builtin(), config)
    }

    pub fn from_catalog(catalog: &Catalog, config: SimConfig) -> Self {
        let mut scene = populate(catalog, &config);
        let clock = SimClock::new(
            config.time_multiplier,
            config.reference_multiplier,
            config.max_frame_dt,
        );

        // Place every body before the first frame is drawn
        let mut events = Vec::with_capacity(8);
        integrator::step(&mut scene, &FrameTime::default(), &mut events);
        events.clear();

        log::info!(
            "simulation ready: {} bodies, time multiplier {}, locale {}",
            scene.len(),
            clock.multiplier(),
            config.locale.code()
        );

        Self {
            locale: config.locale,
            selection: Selection::new(config.scale.orbit),
            config,
            scene,
            clock,
            controls: ControlQueue::new(),
            events,
        }
    }

    /// Queue a control event; it takes effect at the start of the next tick.
    pub fn push_control(&mut self, event: ControlEvent) {
        self.controls.push(event);
    }

    pub fn select(&mut self, id: BodyId) {
        self.push_control(ControlEvent::Select(id));
    }

    pub fn select_by_name(&mut self, name: impl Into<String>) {
        self.push_control(ControlEvent::SelectByName(name.into()));
    }

    pub fn deselect(&mut self) {
        self.push_control(ControlEvent::Deselect);
    }

    pub fn set_time_multiplier(&mut self, multiplier: f64) {
        self.push_control(ControlEvent::SetTimeMultiplier(multiplier));
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.push_control(ControlEvent::SetLocale(locale));
    }

    /// Run one frame. `frame_dt` is real seconds since the previous frame.
    pub fn tick(&mut self, frame_dt: f64) -> FrameTime {
        self.events.clear();

        for event in self.controls.drain() {
            self.apply(event);
        }

        let frame = self.clock.advance(frame_dt);
        integrator::step(&mut self.scene, &frame, &mut self.events);
        self.selection.refresh(&self.scene, frame.sim_dt);
        frame
    }

    fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Select(id) => self.focus(id),
            ControlEvent::SelectByName(name) => {
                match self.scene.find_by_name(&name).map(|entity| entity.id()) {
                    Some(id) => self.focus(id),
                    None => log::warn!("select: no body named {name:?}"),
                }
            }
            ControlEvent::Deselect => {
                if self.selection.deselect() {
                    self.events.push(SimEvent::selection(None));
                }
            }
            ControlEvent::SetTimeMultiplier(multiplier) => {
                self.clock.set_multiplier(multiplier);
                log::info!("time multiplier set to {}", self.clock.multiplier());
            }
            ControlEvent::SetLocale(locale) => {
                self.locale = locale;
                log::info!("locale set to {}", locale.code());
            }
        }
    }

    fn focus(&mut self, id: BodyId) {
        if self.selection.select(&self.scene, id) {
            self.events.push(SimEvent::selection(Some(id)));
        }
    }

    /// Hand every body's transform to `sink`.
    pub fn publish(&self, sink: &mut impl SceneSink) {
        sink.begin_frame();
        for entity in self.scene.iter() {
            sink.push_body(
                entity.id(),
                entity.body.category,
                entity.world_position(),
                entity.facing(),
                entity.is_visible(),
            );
        }
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selection.focus()
    }

    pub fn selected_metrics(&self) -> Option<&MetricsSnapshot> {
        self.selection.metrics()
    }

    /// Metrics of the focused body as JSON in the current locale, or `null`.
    pub fn selected_metrics_json(&self) -> Result<String, serde_json::Error> {
        let report = self.selection.metrics().map(|m| m.report(self.locale));
        serde_json::to_string(&report)
    }

    /// Every body in dependency order.
    pub fn bodies(&self) -> Vec<BodySummary> {
        self.scene
            .iter()
            .map(|entity| BodySummary {
                id: entity.id(),
                name: entity.body.name.clone(),
                category: entity.body.category,
                parent: entity.body.parent,
                size: entity.body.size,
            })
            .collect()
    }

    pub fn bodies_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.bodies())
    }

    /// Events raised during the last tick.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EVENT_COMET_DEPARTED, EVENT_SELECTION};
    use crate::bridge::protocol::TransformBuffer;
    use crate::core::kepler::wrap_pi;

    const FRAME: f64 = 1.0 / 60.0;

    fn snapshot(sim: &Simulation) -> Vec<(f64, f64, f64, f64, f64, bool)> {
        sim.scene()
            .iter()
            .map(|b| {
                let anomalies = b
                    .motion
                    .orbit()
                    .map(|o| (o.mean_anomaly(), o.true_anomaly()))
                    .unwrap_or((0.0, 0.0));
                let p = b.world_position();
                (anomalies.0, anomalies.1, p.x, p.z, b.facing(), b.is_visible())
            })
            .collect()
    }

    #[test]
    fn zero_multiplier_freezes_everything() {
        let mut sim = Simulation::new(SimConfig { time_multiplier: 0.0, ..SimConfig::default() });
        let before = snapshot(&sim);
        for _ in 0..600 {
            sim.tick(FRAME);
        }
        assert_eq!(before, snapshot(&sim));
        assert_eq!(sim.clock().sim_elapsed(), 0.0);
    }

    #[test]
    fn pause_and_resume_through_controls() {
        let mut sim = Simulation::default();
        sim.tick(FRAME);
        sim.set_time_multiplier(0.0);
        sim.tick(FRAME);
        let paused = snapshot(&sim);
        sim.tick(FRAME);
        assert_eq!(paused, snapshot(&sim));

        sim.set_time_multiplier(1000.0);
        sim.tick(FRAME);
        assert_ne!(paused, snapshot(&sim));
    }

    #[test]
    fn earth_completes_one_year() {
        let mut sim = Simulation::new(SimConfig { max_frame_dt: 1.0, ..SimConfig::default() });
        let earth = sim.scene().find_by_name("Earth").unwrap().id();
        let start = sim.scene().get(earth).unwrap().motion.orbit().unwrap().mean_anomaly();

        // 365.256 days at 1000x, in 1 s frames
        for _ in 0..31_558 {
            sim.tick(1.0);
        }
        let rest = 365.256 * 86_400.0 / 1000.0 - 31_558.0;
        sim.tick(rest);

        let end = sim.scene().get(earth).unwrap().motion.orbit().unwrap().mean_anomaly();
        assert!(wrap_pi(end - start).abs() < 1e-6, "drift {}", wrap_pi(end - start));
    }

    #[test]
    fn selection_by_name_refreshes_each_tick() {
        let mut sim = Simulation::default();
        sim.select_by_name("earth");
        sim.tick(FRAME);

        assert_eq!(sim.events(), &[SimEvent::selection(Some(BodyId(3)))]);
        assert_eq!(sim.events()[0].kind, EVENT_SELECTION);
        let first = sim.selected_metrics().unwrap().clone();
        assert_eq!(first.name, "Earth");
        assert!((first.distance_au - 1.0).abs() < 0.02);
        assert!(first.orbital_velocity > 29_000.0 && first.orbital_velocity < 30_500.0);

        sim.tick(FRAME);
        sim.tick(FRAME);
        let later = sim.selected_metrics().unwrap();
        assert!(sim.events().is_empty());
        assert!(later.observed_rotation.angular_velocity > 0.0);
        let expected = later.rotation_angular_velocity;
        assert!((later.observed_rotation.angular_velocity - expected).abs() / expected < 1e-6);

        sim.deselect();
        sim.tick(FRAME);
        assert!(sim.selected_metrics().is_none());
        assert_eq!(sim.events(), &[SimEvent::selection(None)]);
        assert_eq!(sim.selected_metrics_json().unwrap(), "null");
    }

    #[test]
    fn reselecting_the_focus_raises_no_event() {
        let mut sim = Simulation::default();
        sim.select(BodyId(3));
        sim.tick(FRAME);
        assert_eq!(sim.events().len(), 1);

        sim.select(BodyId(3));
        sim.select_by_name("Earth");
        sim.tick(FRAME);
        assert!(sim.events().is_empty());
        assert_eq!(sim.selected(), Some(BodyId(3)));
    }

    #[test]
    fn moon_reports_its_planet_distance_at_any_orbit_scale() {
        let distance_au = |orbit_scale: f64, name: &str| {
            let mut config = SimConfig { time_multiplier: 0.0, ..SimConfig::default() };
            config.scale.orbit = orbit_scale;
            let mut sim = Simulation::new(config);
            sim.select_by_name(name);
            sim.tick(FRAME);
            sim.selected_metrics().unwrap().distance_au
        };

        let earth = distance_au(80.0, "Earth");
        assert!((earth - 1.0).abs() < 0.02, "{earth}");
        for orbit_scale in [80.0, 40.0, 160.0] {
            assert_eq!(distance_au(orbit_scale, "Earth"), earth);
            assert_eq!(distance_au(orbit_scale, "Moon"), earth);
        }
    }

    #[test]
    fn comet_distance_follows_the_orbit_scale() {
        let distance_au = |orbit_scale: f64| {
            let mut config = SimConfig { time_multiplier: 0.0, ..SimConfig::default() };
            config.scale.orbit = orbit_scale;
            let mut sim = Simulation::new(config);
            sim.select_by_name("1P/Halley");
            sim.tick(FRAME);
            sim.selected_metrics().unwrap().distance_au
        };
        let wide = distance_au(80.0);
        assert!(wide > 0.0);
        assert!((distance_au(40.0) - 2.0 * wide).abs() < 1e-9 * wide);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut sim = Simulation::default();
        sim.select_by_name("Vulcan");
        sim.select(BodyId(999));
        sim.tick(FRAME);
        assert_eq!(sim.selected(), None);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn metrics_json_follows_locale() {
        let mut sim = Simulation::default();
        sim.select_by_name("Mercury");
        sim.tick(FRAME);
        assert!(sim.selected_metrics_json().unwrap().contains("87일 23시간"));

        sim.set_locale(Locale::English);
        sim.tick(FRAME);
        let json = sim.selected_metrics_json().unwrap();
        assert!(json.contains("\"orbitalPeriodText\":\"0yr 87d 23h\""), "{json}");
    }

    #[test]
    fn comets_pause_with_the_clock() {
        let mut sim = Simulation::new(SimConfig { time_multiplier: 0.0, ..SimConfig::default() });
        let t = |sim: &Simulation| {
            let halley = sim.scene().find_by_name("1P/Halley").unwrap();
            halley.motion.comet().unwrap().t()
        };
        let before = t(&sim);
        sim.tick(0.25);
        assert_eq!(t(&sim), before);

        sim.set_time_multiplier(1000.0);
        sim.tick(0.1);
        // speed 3 · factor 5 · 0.1 s
        assert!((t(&sim) - before - 1.5).abs() < 1e-9);
    }

    #[test]
    fn comet_departure_reaches_the_event_list() {
        let mut sim = Simulation::new(SimConfig { max_frame_dt: 1.0, ..SimConfig::default() });
        let mut departed = 0;
        // Slowest is ATLAS: 130 units of t at 12.5 per second
        for _ in 0..12 {
            sim.tick(1.0);
            departed += sim.events().iter().filter(|e| e.kind == EVENT_COMET_DEPARTED).count();
        }
        assert_eq!(departed, 3);
    }

    #[test]
    fn body_list_names_parents() {
        let sim = Simulation::default();
        let bodies = sim.bodies();
        assert_eq!(bodies.len(), sim.scene().len());
        let moon = bodies.iter().find(|b| b.name == "Moon").unwrap();
        assert_eq!(moon.parent, Some(BodyId(3)));
        assert_eq!(moon.category, BodyCategory::Moon);

        assert_eq!(bodies[0].size, 25.0);
        assert!(moon.size > 0.0);

        let json = sim.bodies_json().unwrap();
        let sun = r#"[{"id":0,"name":"Sun","category":"star","parent":null,"size":25.0}"#;
        assert!(json.starts_with(sun), "{json}");
    }

    #[test]
    fn publish_writes_one_transform_per_body() {
        let sim = Simulation::default();
        let mut buffer = TransformBuffer::new();
        sim.publish(&mut buffer);
        assert_eq!(buffer.body_count() as usize, sim.scene().len());
        assert!(buffer.transforms.iter().all(|t| t.visible == 1.0));

        let earth = &buffer.transforms[3];
        assert_eq!(earth.id, 3.0);
        let expected = sim.scene().get(BodyId(3)).unwrap().world_position().as_vec3();
        assert_eq!(earth.position(), expected);

        sim.publish(&mut buffer);
        assert_eq!(buffer.body_count() as usize, sim.scene().len());
    }
}
