use std::f64::consts::TAU;

use crate::core::kepler::normalize_angle;
use crate::core::units::hours_to_seconds;

/// Spin rate (rad per simulated second) for bodies without a rotation period.
/// 0.2 rad per real second at the default 1000× multiplier.
pub const FALLBACK_SPIN_RATE: f64 = 2.0e-4;

/// Angular speed (rad/s) for a rotation period in hours. Direction is dropped;
/// a zero or non-finite period gives 0.
pub fn rotation_angular_velocity(period_hours: f64) -> f64 {
    if !period_hours.is_finite() || period_hours == 0.0 {
        return 0.0;
    }
    TAU / hours_to_seconds(period_hours.abs())
}

/// Spin of a body about its own axis, independent of its orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationState {
    /// Current angle, wrapped into [0, 2π).
    angle: f64,
    /// Rotation period in hours. Negative means retrograde.
    period_hours: Option<f64>,
}

impl RotationState {
    pub fn new(period_hours: Option<f64>) -> Self {
        Self {
            angle: 0.0,
            period_hours: period_hours.filter(|p| p.is_finite() && *p != 0.0),
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = normalize_angle(angle);
        self
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn period_hours(&self) -> Option<f64> {
        self.period_hours
    }

    /// Signed spin rate (rad per simulated second).
    pub fn angular_velocity(&self) -> f64 {
        match self.period_hours {
            Some(period) => rotation_angular_velocity(period) * period.signum(),
            None => FALLBACK_SPIN_RATE,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.angle = normalize_angle(self.angle + self.angular_velocity() * dt);
        }
    }
}
