//! Physical constants and the single bridge between simulation units and SI.
//!
//! Simulation units exist only for rendering. Anything reported to the user
//! goes through `sim_to_meters` / `meters_to_au`; the two systems are never
//! mixed anywhere else.

/// Gravitational constant (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.67430e-11;
/// Solar mass (kg).
pub const SUN_MASS: f64 = 1.9891e30;
/// One astronomical unit (m).
pub const AU: f64 = 1.496e11;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Default simulation units per AU, the scene's default orbit scale. A
/// planet catalogued at 1 AU sits 80 units (plus the star radius) out.
pub const SIM_UNITS_PER_AU: f64 = 80.0;

/// Convert a scene-space distance into meters at `units_per_au` scene units
/// per AU. A non-positive scale gives 0.
pub fn sim_to_meters(sim_distance: f64, units_per_au: f64) -> f64 {
    if !(units_per_au > 0.0) {
        return 0.0;
    }
    sim_distance / units_per_au * AU
}

pub fn au_to_meters(au: f64) -> f64 {
    au * AU
}

pub fn meters_to_au(meters: f64) -> f64 {
    meters / AU
}

pub fn days_to_seconds(days: f64) -> f64 {
    days * SECONDS_PER_DAY
}

pub fn hours_to_seconds(hours: f64) -> f64 {
    hours * SECONDS_PER_HOUR
}
