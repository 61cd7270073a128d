//! Kepler's equation. Pure math, no scene dependencies.
//!
//! Mean anomaly → eccentric anomaly (Newton–Raphson) → true anomaly.
//! Everything is f64; positions only drop to f32 at the wire format.

use std::f64::consts::{PI, TAU};

/// Newton–Raphson stops once a step is smaller than this.
pub const TOLERANCE: f64 = 1e-10;
/// Hard iteration cap. Hitting it is not an error; the last estimate is used.
pub const MAX_ITERATIONS: usize = 50;
/// Above this eccentricity the first guess starts at π instead of M + e·sin M.
const HIGH_ECCENTRICITY: f64 = 0.8;
/// Eccentricities at or past 1 are squeezed just under it so √(1 − e) stays real.
const MAX_ELLIPTIC_ECCENTRICITY: f64 = 1.0 - 1e-9;

/// Wrap an angle into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle difference into [-π, π).
pub fn wrap_pi(angle: f64) -> f64 {
    normalize_angle(angle + PI) - PI
}

/// Clamp an eccentricity into the solver's elliptic domain [0, 1).
pub fn clamp_eccentricity(eccentricity: f64) -> f64 {
    if eccentricity.is_finite() {
        eccentricity.clamp(0.0, MAX_ELLIPTIC_ECCENTRICITY)
    } else {
        0.0
    }
}

/// Solve `E − e·sin(E) = M` for the eccentric anomaly E.
/// `mean_anomaly` in radians (any range), returns E in radians.
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e = clamp_eccentricity(eccentricity);
    let m = normalize_angle(mean_anomaly);
    if e == 0.0 {
        return m;
    }

    let mut ea = if e > HIGH_ECCENTRICITY { PI } else { m + e * m.sin() };
    for _ in 0..MAX_ITERATIONS {
        let f = ea - e * ea.sin() - m;
        let derivative = 1.0 - e * ea.cos();
        let delta = f / derivative;
        ea -= delta;
        if delta.abs() < TOLERANCE {
            break;
        }
    }

    if ea.is_finite() {
        ea
    } else {
        m
    }
}

/// True anomaly ν in [0, 2π) for a mean anomaly and eccentricity.
///
/// `e == 0` returns the (normalized) mean anomaly untouched, without running
/// the solver.
pub fn true_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    if !mean_anomaly.is_finite() {
        return 0.0;
    }
    let m = normalize_angle(mean_anomaly);
    if !(eccentricity > 0.0) {
        return m;
    }

    let e = clamp_eccentricity(eccentricity);
    let half = eccentric_anomaly(m, e) * 0.5;
    let nu = 2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos());
    normalize_angle(nu)
}

/// Inverse relation: mean anomaly for a given true anomaly.
pub fn mean_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    if !(eccentricity > 0.0) {
        return normalize_angle(true_anomaly);
    }
    let e = clamp_eccentricity(eccentricity);
    let half = true_anomaly * 0.5;
    let ea = 2.0 * ((1.0 - e).sqrt() * half.sin()).atan2((1.0 + e).sqrt() * half.cos());
    normalize_angle(ea - e * ea.sin())
}

/// Focal distance on a conic: `a(1 − e²) / (1 + e·cos ν)`.
///
/// Exactly `a` for a circle. Non-positive axes give 0.
pub fn orbital_radius(semi_major_axis: f64, eccentricity: f64, true_anomaly: f64) -> f64 {
    if !(semi_major_axis > 0.0) {
        return 0.0;
    }
    if !(eccentricity > 0.0) {
        return semi_major_axis;
    }
    let e = clamp_eccentricity(eccentricity);
    let denominator = 1.0 + e * true_anomaly.cos();
    if denominator <= f64::EPSILON {
        return 0.0;
    }
    semi_major_axis * (1.0 - e * e) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_anomaly_grid() -> impl Iterator<Item = f64> {
        (0..360).map(|i| i as f64 * TAU / 360.0)
    }

    #[test]
    fn circular_orbit_returns_mean_anomaly_exactly() {
        for m in mean_anomaly_grid() {
            assert_eq!(true_anomaly(m, 0.0), m);
            assert_eq!(orbital_radius(7.5, 0.0, true_anomaly(m, 0.0)), 7.5);
        }
    }

    #[test]
    fn forward_then_inverse_recovers_mean_anomaly() {
        for step in 0..=99 {
            let e = step as f64 / 100.0;
            for m in mean_anomaly_grid() {
                let nu = true_anomaly(m, e);
                assert!(nu.is_finite(), "nu not finite for m={m}, e={e}");
                assert!((0.0..TAU).contains(&nu), "nu={nu} out of range");

                let r = orbital_radius(1.0, e, nu);
                assert!(r.is_finite() && r > 0.0, "r={r} for m={m}, e={e}");

                let recovered = mean_from_true(nu, e);
                let err = wrap_pi(recovered - m).abs();
                assert!(err < 1e-6, "m={m}, e={e}, recovered={recovered}, err={err}");
            }
        }
    }

    #[test]
    fn solver_converges_to_small_residual() {
        for e in [0.0167, 0.2056, 0.5, 0.85, 0.95, 0.99] {
            for m in mean_anomaly_grid() {
                let ea = eccentric_anomaly(m, e);
                let residual = ea - e * ea.sin() - m;
                assert!(residual.abs() < 1e-9, "residual={residual} for m={m}, e={e}");
            }
        }
    }

    #[test]
    fn mercury_matches_known_anomaly() {
        // M = 1.5 rad, e = 0.2056: ν leads M on the way out from perihelion
        let nu = true_anomaly(1.5, 0.2056);
        assert!(nu > 1.5 && nu < 2.0, "nu = {nu}");
    }

    #[test]
    fn perihelion_and_aphelion_are_fixed_points() {
        let e = 0.6;
        assert!(true_anomaly(0.0, e).abs() < 1e-12);
        assert!((true_anomaly(PI, e) - PI).abs() < 1e-9);
        assert!((orbital_radius(2.0, e, 0.0) - 2.0 * (1.0 - e)).abs() < 1e-12);
        assert!((orbital_radius(2.0, e, PI) - 2.0 * (1.0 + e)).abs() < 1e-12);
    }

    #[test]
    fn hyperbolic_eccentricity_stays_finite() {
        for m in mean_anomaly_grid() {
            let nu = true_anomaly(m, 1.2);
            assert!(nu.is_finite());
            assert!(orbital_radius(1.0, 1.2, nu).is_finite());
        }
    }

    #[test]
    fn degenerate_inputs_do_not_produce_nan() {
        assert_eq!(true_anomaly(f64::NAN, 0.3), 0.0);
        assert_eq!(true_anomaly(1.0, f64::NAN), 1.0);
        assert_eq!(orbital_radius(0.0, 0.3, 1.0), 0.0);
        assert_eq!(orbital_radius(-4.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn normalize_and_wrap() {
        assert!((normalize_angle(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert!((wrap_pi(TAU - 0.1) + 0.1).abs() < 1e-12);
        assert!((wrap_pi(0.1) - 0.1).abs() < 1e-12);
    }
}
