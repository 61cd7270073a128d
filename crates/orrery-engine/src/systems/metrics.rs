//! Dashboard metrics: real-world quantities derived from orbit state.
//!
//! Pure functions; nothing here mutates an orbit. Every formula guards its
//! own denominator and returns 0 instead of an infinity or NaN. Values are
//! approximate and meant for an educational display.
//!
//! Moons are measured against the star's field, not their planet's, at the
//! distance of the planet they circle.

use glam::DVec3;
use serde::Serialize;

use crate::api::types::{BodyCategory, BodyId};
use crate::components::body::Body;
use crate::components::entity::Motion;
use crate::components::rotation::rotation_angular_velocity;
use crate::core::kepler::{orbital_radius, wrap_pi};
use crate::core::units::{meters_to_au, sim_to_meters, G};
use crate::systems::format::{Locale, PeriodBreakdown, RotationBreakdown};

/// Circular orbital speed `√(GM/r)` (m/s).
pub fn circular_velocity(gm: f64, distance_m: f64) -> f64 {
    if !(distance_m > 0.0) || !(gm > 0.0) {
        return 0.0;
    }
    (gm / distance_m).sqrt()
}

/// Vis-viva speed `√(GM(2/r − 1/a))` (m/s). Unbound points give 0.
pub fn vis_viva_velocity(gm: f64, distance_m: f64, semi_major_axis_m: f64) -> f64 {
    if !(distance_m > 0.0) || !(semi_major_axis_m > 0.0) || !(gm > 0.0) {
        return 0.0;
    }
    let energy_term = 2.0 / distance_m - 1.0 / semi_major_axis_m;
    if energy_term <= 0.0 {
        return 0.0;
    }
    (gm * energy_term).sqrt()
}

/// Gravitational acceleration `GM/r²` (m/s²).
pub fn gravitational_acceleration(gm: f64, distance_m: f64) -> f64 {
    if !(distance_m > 0.0) || !(gm > 0.0) {
        return 0.0;
    }
    gm / (distance_m * distance_m)
}

/// Centrifugal acceleration `v²/r` (m/s²).
pub fn centrifugal_acceleration(velocity: f64, distance_m: f64) -> f64 {
    if !(distance_m > 0.0) || !velocity.is_finite() {
        return 0.0;
    }
    velocity * velocity / distance_m
}

/// Spin measured from frame-to-frame angle changes rather than the period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedRotation {
    /// Signed rad per simulated second.
    pub angular_velocity: f64,
    /// rad/s².
    pub angular_acceleration: f64,
}

/// Differences successive rotation angles of the focused body.
#[derive(Debug, Clone, Default)]
pub struct RotationSampler {
    previous_angle: Option<f64>,
    previous_rate: Option<f64>,
}

impl RotationSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget history (called when the focus changes).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the current angle and the simulated time since the last sample.
    ///
    /// The first sample only seeds history. A zero delta (paused) reports no
    /// motion and leaves history alone, so resuming does not spike.
    pub fn sample(&mut self, angle: f64, dt: f64) -> ObservedRotation {
        let Some(previous_angle) = self.previous_angle else {
            self.previous_angle = Some(angle);
            return ObservedRotation::default();
        };
        if !(dt.is_finite() && dt > 0.0) {
            return ObservedRotation::default();
        }

        let rate = wrap_pi(angle - previous_angle) / dt;
        let acceleration = match self.previous_rate {
            Some(previous_rate) => (rate - previous_rate) / dt,
            None => 0.0,
        };

        self.previous_angle = Some(angle);
        self.previous_rate = Some(rate);
        ObservedRotation {
            angular_velocity: rate,
            angular_acceleration: acceleration,
        }
    }
}

/// Everything the dashboard shows for the focused body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub id: BodyId,
    pub name: String,
    pub category: BodyCategory,
    pub description: String,

    /// Distance to the central body (m).
    pub distance_m: f64,
    pub distance_au: f64,
    /// m/s.
    pub orbital_velocity: f64,
    /// m/s².
    pub gravitational_acceleration: f64,
    /// m/s².
    pub centrifugal_acceleration: f64,

    pub mass_kg: Option<f64>,
    pub radius_km: Option<f64>,
    pub surface_gravity: Option<f64>,

    pub orbital_period_days: Option<f64>,
    pub orbital_period: Option<PeriodBreakdown>,
    pub rotation_period_hours: Option<f64>,
    pub rotation_period: Option<RotationBreakdown>,
    /// Theoretical spin rate from the period (rad/s, unsigned).
    pub rotation_angular_velocity: f64,
    pub observed_rotation: ObservedRotation,
}

/// Snapshot plus locale-dependent text, as sent to the host page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport<'a> {
    #[serde(flatten)]
    pub metrics: &'a MetricsSnapshot,
    pub locale: Locale,
    pub orbital_period_text: Option<String>,
    pub rotation_period_text: Option<String>,
}

impl MetricsSnapshot {
    pub fn report(&self, locale: Locale) -> MetricsReport<'_> {
        MetricsReport {
            metrics: self,
            locale,
            orbital_period_text: self.orbital_period.map(|p| p.format(locale)),
            rotation_period_text: self.rotation_period.map(|r| r.format(locale)),
        }
    }

    pub fn to_json(&self, locale: Locale) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.report(locale))
    }
}

/// Distance from the star in meters for a body orbiting it directly.
///
/// Uses the real-unit ellipse when the orbit has one. Otherwise the scene
/// offset from the orbit centre (the star shifted by the orbit's base
/// offset along +x) is converted at `units_per_au`.
pub fn star_distance_m(
    motion: &Motion,
    world_position: DVec3,
    star_position: DVec3,
    units_per_au: f64,
) -> f64 {
    let orbit = motion.orbit();
    if let Some(orbit) = orbit {
        if let Some(axis_m) = orbit.semi_major_axis_m() {
            return orbital_radius(axis_m, orbit.eccentricity(), orbit.true_anomaly());
        }
    }
    let centre = star_position + DVec3::X * orbit.map_or(0.0, |o| o.base_offset());
    sim_to_meters(world_position.distance(centre), units_per_au)
}

/// Derive metrics for one body at `distance_m` from a star of
/// `central_mass`. Speed follows vis-viva when the orbit carries a
/// real-unit axis, otherwise the circular speed at that distance.
pub fn compute_metrics(
    body: &Body,
    motion: &Motion,
    distance_m: f64,
    central_mass: f64,
    observed: ObservedRotation,
) -> MetricsSnapshot {
    let gm = G * central_mass;
    let real_axis_m = motion.orbit().and_then(|o| o.semi_major_axis_m());
    let distance_m = if distance_m.is_finite() { distance_m.max(0.0) } else { 0.0 };

    let orbital_velocity = match real_axis_m {
        Some(axis_m) => vis_viva_velocity(gm, distance_m, axis_m),
        None => circular_velocity(gm, distance_m),
    };

    let orbital_period_days = motion.orbit().and_then(|o| o.orbital_period_days());
    let rotation_period_hours = body.physical.rotation_period_hours;

    MetricsSnapshot {
        id: body.id,
        name: body.name.clone(),
        category: body.category,
        description: body.description.clone(),
        distance_m,
        distance_au: meters_to_au(distance_m),
        orbital_velocity,
        gravitational_acceleration: gravitational_acceleration(gm, distance_m),
        centrifugal_acceleration: centrifugal_acceleration(orbital_velocity, distance_m),
        mass_kg: body.physical.mass_kg,
        radius_km: body.physical.radius_km,
        surface_gravity: body.physical.surface_gravity,
        orbital_period_days,
        orbital_period: orbital_period_days.map(PeriodBreakdown::from_days),
        rotation_period_hours,
        rotation_period: rotation_period_hours.map(RotationBreakdown::from_hours),
        rotation_angular_velocity: rotation_period_hours
            .map(rotation_angular_velocity)
            .unwrap_or(0.0),
        observed_rotation: observed,
    }
}
