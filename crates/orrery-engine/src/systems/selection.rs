use crate::api::types::BodyId;
use crate::components::entity::SimBody;
use crate::core::scene::Scene;
use crate::core::units::{SIM_UNITS_PER_AU, SUN_MASS};
use crate::systems::metrics::{compute_metrics, star_distance_m, MetricsSnapshot, RotationSampler};

/// The focused body and its live metrics.
#[derive(Debug)]
pub struct Selection {
    focus: Option<BodyId>,
    sampler: RotationSampler,
    metrics: Option<MetricsSnapshot>,
    /// Scene units per AU the bodies were placed with.
    units_per_au: f64,
}

impl Selection {
    pub fn new(units_per_au: f64) -> Self {
        Self {
            focus: None,
            sampler: RotationSampler::new(),
            metrics: None,
            units_per_au,
        }
    }

    pub fn focus(&self) -> Option<BodyId> {
        self.focus
    }

    /// Focus `id`. Returns whether the focus changed: unknown ids and the
    /// already focused body leave everything untouched.
    pub fn select(&mut self, scene: &Scene, id: BodyId) -> bool {
        if scene.get(id).is_none() {
            log::warn!("select: no body with id {id:?}");
            return false;
        }
        if self.focus == Some(id) {
            return false;
        }
        self.focus = Some(id);
        self.sampler.reset();
        self.metrics = None;
        log::debug!("selected {id:?}");
        true
    }

    /// Clear the focus. Returns whether anything was focused.
    pub fn deselect(&mut self) -> bool {
        self.sampler.reset();
        self.metrics = None;
        self.focus.take().is_some()
    }

    /// Recompute metrics for the focused body after the scene has moved.
    pub fn refresh(&mut self, scene: &Scene, sim_dt: f64) {
        let Some(id) = self.focus else {
            return;
        };
        let Some(entity) = scene.get(id) else {
            self.deselect();
            return;
        };

        let observed = self.sampler.sample(entity.rotation.angle(), sim_dt);
        let central_mass = scene
            .star()
            .and_then(|star| star.body.physical.mass_kg)
            .unwrap_or(SUN_MASS);

        self.metrics = Some(compute_metrics(
            &entity.body,
            &entity.motion,
            self.distance_from_star_m(scene, entity),
            central_mass,
            observed,
        ));
    }

    /// Satellites report the distance of the body they circle, so a moon
    /// sits where its planet does in the star's field.
    fn distance_from_star_m(&self, scene: &Scene, entity: &SimBody) -> f64 {
        let mut current = entity;
        while current.motion.orbit().is_some_and(|o| o.is_satellite()) {
            match scene.parent_of(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        star_distance_m(
            &current.motion,
            current.world_position(),
            scene.star_position(),
            self.units_per_au,
        )
    }

    pub fn metrics(&self) -> Option<&MetricsSnapshot> {
        self.metrics.as_ref()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(SIM_UNITS_PER_AU)
    }
}
