use std::f64::consts::TAU;

use glam::DVec3;

use crate::core::kepler::{self, normalize_angle};
use crate::core::units::days_to_seconds;

/// Fallback mean motion per unit of catalog `speed` (rad per simulated
/// second), for orbits without a period. At the default 1000× multiplier this
/// is 0.05 rad per real second per unit of speed.
pub const FALLBACK_ORBIT_RATE: f64 = 5.0e-5;

/// Elliptical orbit of one body around a fixed focus.
///
/// Only `advance` moves the derived fields (`mean_anomaly`, `true_anomaly`,
/// `distance`, `local_position`); they are recomputed from `elapsed_time`
/// every tick rather than accumulated.
#[derive(Debug, Clone)]
pub struct OrbitState {
    /// Semi-major axis in scene units.
    semi_major_axis: f64,
    /// Semi-major axis in meters, when the catalog gives the orbit in AU.
    semi_major_axis_m: Option<f64>,
    eccentricity: f64,
    /// Orbital period in days. Negative means retrograde.
    orbital_period_days: Option<f64>,
    /// Catalog speed used by the fallback angular rate.
    speed: f64,
    initial_mean_anomaly: f64,
    is_satellite: bool,
    /// Shift along +x applied to star-centred orbits (the star's radius).
    base_offset: f64,

    elapsed_time: f64,
    mean_anomaly: f64,
    true_anomaly: f64,
    distance: f64,
    local_position: DVec3,
}

impl OrbitState {
    /// A star-centred orbit with no period, offset, or starting anomaly.
    pub fn new(semi_major_axis: f64, eccentricity: f64) -> Self {
        let mut orbit = Self {
            semi_major_axis: semi_major_axis.max(0.0),
            semi_major_axis_m: None,
            eccentricity: if eccentricity.is_finite() { eccentricity.max(0.0) } else { 0.0 },
            orbital_period_days: None,
            speed: 0.0,
            initial_mean_anomaly: 0.0,
            is_satellite: false,
            base_offset: 0.0,
            elapsed_time: 0.0,
            mean_anomaly: 0.0,
            true_anomaly: 0.0,
            distance: 0.0,
            local_position: DVec3::ZERO,
        };
        orbit.recompute();
        orbit
    }

    // -- Builder pattern --

    pub fn with_period_days(mut self, days: f64) -> Self {
        self.orbital_period_days = (days.is_finite() && days != 0.0).then_some(days);
        self.recompute();
        self
    }

    pub fn with_real_axis_m(mut self, meters: f64) -> Self {
        self.semi_major_axis_m = (meters.is_finite() && meters > 0.0).then_some(meters);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = if speed.is_finite() { speed } else { 0.0 };
        self.recompute();
        self
    }

    pub fn with_initial_mean_anomaly(mut self, angle: f64) -> Self {
        self.initial_mean_anomaly = normalize_angle(angle);
        self.recompute();
        self
    }

    pub fn with_base_offset(mut self, offset: f64) -> Self {
        self.base_offset = offset;
        self.recompute();
        self
    }

    /// Mark as orbiting a planet: positions are relative to the parent and
    /// the star-radius offset is dropped.
    pub fn satellite(mut self) -> Self {
        self.is_satellite = true;
        self.base_offset = 0.0;
        self.recompute();
        self
    }

    // -- Update --

    /// Advance simulated time by `dt` seconds and re-derive the orbit.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_time += dt;
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let swept = match self.period_seconds() {
            Some(period) => TAU / period * self.elapsed_time,
            None => self.speed * FALLBACK_ORBIT_RATE * self.elapsed_time,
        };
        self.mean_anomaly = normalize_angle(self.initial_mean_anomaly + swept);
        self.true_anomaly = kepler::true_anomaly(self.mean_anomaly, self.eccentricity);
        self.distance =
            kepler::orbital_radius(self.semi_major_axis, self.eccentricity, self.true_anomaly);

        let (sin, cos) = self.true_anomaly.sin_cos();
        self.local_position = DVec3::new(
            self.base_offset + self.distance * cos,
            0.0,
            self.distance * sin,
        );
    }

    // -- Accessors --

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_major_axis_m(&self) -> Option<f64> {
        self.semi_major_axis_m
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn orbital_period_days(&self) -> Option<f64> {
        self.orbital_period_days
    }

    /// Signed period in seconds, if any.
    pub fn period_seconds(&self) -> Option<f64> {
        self.orbital_period_days.map(days_to_seconds)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn initial_mean_anomaly(&self) -> f64 {
        self.initial_mean_anomaly
    }

    pub fn is_satellite(&self) -> bool {
        self.is_satellite
    }

    pub fn base_offset(&self) -> f64 {
        self.base_offset
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    pub fn true_anomaly(&self) -> f64 {
        self.true_anomaly
    }

    /// Current focal distance in scene units.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Position in the orbital plane, relative to the focus (y = 0).
    pub fn local_position(&self) -> DVec3 {
        self.local_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kepler::wrap_pi;
    use crate::core::units::{AU, SIM_UNITS_PER_AU};

    const EARTH_YEAR_DAYS: f64 = 365.256;

    fn earth() -> OrbitState {
        OrbitState::new(SIM_UNITS_PER_AU, 0.0)
            .with_real_axis_m(AU)
            .with_period_days(EARTH_YEAR_DAYS)
            .with_base_offset(25.0)
            .with_initial_mean_anomaly(1.234)
    }

    #[test]
    fn full_period_returns_to_start() {
        let mut orbit = earth();
        let m0 = orbit.mean_anomaly();
        let p0 = orbit.local_position();

        orbit.advance(days_to_seconds(EARTH_YEAR_DAYS));

        assert!(wrap_pi(orbit.mean_anomaly() - m0).abs() < 1e-6);
        let p1 = orbit.local_position();
        assert!((p1.x - p0.x).abs() < 1e-6, "x {} vs {}", p1.x, p0.x);
        assert!((p1.z - p0.z).abs() < 1e-6, "z {} vs {}", p1.z, p0.z);
    }

    #[test]
    fn circular_orbit_keeps_exact_radius() {
        let mut orbit = earth();
        for _ in 0..100 {
            orbit.advance(86_400.0 * 3.7);
            assert_eq!(orbit.true_anomaly(), orbit.mean_anomaly());
            assert_eq!(orbit.distance(), SIM_UNITS_PER_AU);
        }
    }

    #[test]
    fn position_is_offset_along_x_only() {
        let orbit = OrbitState::new(10.0, 0.0).with_base_offset(25.0);
        let p = orbit.local_position();
        assert_eq!(p, DVec3::new(35.0, 0.0, 0.0));
    }

    #[test]
    fn satellite_drops_the_offset() {
        let orbit = OrbitState::new(10.0, 0.0).with_base_offset(25.0).satellite();
        assert!(orbit.is_satellite());
        assert_eq!(orbit.base_offset(), 0.0);
        assert_eq!(orbit.local_position(), DVec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn many_small_steps_match_one_large_step() {
        let mut stepped = OrbitState::new(100.0, 0.3).with_period_days(88.0);
        let mut jumped = stepped.clone();

        let dt = 1000.0 / 60.0;
        for _ in 0..6000 {
            stepped.advance(dt);
        }
        jumped.advance(dt * 6000.0);

        assert!((stepped.elapsed_time() - jumped.elapsed_time()).abs() < 1e-6);
        assert!(wrap_pi(stepped.mean_anomaly() - jumped.mean_anomaly()).abs() < 1e-9);
        assert!((stepped.local_position() - jumped.local_position()).length() < 1e-6);
    }

    #[test]
    fn eccentric_orbit_swings_between_apsides() {
        let e = 0.5;
        let mut orbit = OrbitState::new(10.0, e).with_period_days(1.0);
        let mut min_r = f64::MAX;
        let mut max_r: f64 = 0.0;
        for _ in 0..1000 {
            orbit.advance(86.4);
            min_r = min_r.min(orbit.distance());
            max_r = max_r.max(orbit.distance());
        }
        assert!((min_r - 5.0).abs() < 0.05, "perihelion {min_r}");
        assert!((max_r - 15.0).abs() < 0.05, "aphelion {max_r}");
    }

    #[test]
    fn missing_period_uses_fallback_rate() {
        let mut orbit = OrbitState::new(10.0, 0.0).with_speed(2.0);
        orbit.advance(1000.0);
        let expected = 2.0 * FALLBACK_ORBIT_RATE * 1000.0;
        assert!((orbit.mean_anomaly() - expected).abs() < 1e-12);
    }

    #[test]
    fn negative_period_runs_retrograde() {
        let mut orbit = OrbitState::new(10.0, 0.0)
            .with_period_days(-5.877)
            .with_initial_mean_anomaly(1.0);
        orbit.advance(3600.0);
        assert!(wrap_pi(orbit.mean_anomaly() - 1.0) < 0.0);
    }

    #[test]
    fn zero_or_bad_deltas_change_nothing() {
        let mut orbit = earth();
        let before = (orbit.mean_anomaly(), orbit.true_anomaly(), orbit.local_position());
        orbit.advance(0.0);
        orbit.advance(-10.0);
        orbit.advance(f64::NAN);
        assert_eq!(before, (orbit.mean_anomaly(), orbit.true_anomaly(), orbit.local_position()));
        assert_eq!(orbit.elapsed_time(), 0.0);
    }

    #[test]
    fn zero_period_is_treated_as_missing() {
        let orbit = OrbitState::new(10.0, 0.0).with_period_days(0.0);
        assert_eq!(orbit.orbital_period_days(), None);
    }
}
