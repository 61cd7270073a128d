//! Comet flyby controller.
//!
//! Comets do not use the elliptical orbit model. Each one sweeps a
//! parabola-like path through the inner system, disappears, waits out a
//! respawn delay, and comes back from the far end of the path.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a comet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CometPhase {
    /// Traversing the path; `t` increases toward the upper bound.
    Active,
    /// Invisible, counting down the respawn delay.
    Waiting,
}

/// A phase change reported by `CometFlyby::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CometTransition {
    Departed,
    Returned,
}

/// Path shape and timing shared by all comets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CometTuning {
    /// Path parameter at creation.
    pub initial_t: f64,
    /// Path parameter after each respawn.
    pub restart_t: f64,
    /// Path parameter past which the comet leaves.
    pub end_t: f64,
    /// Seconds spent waiting before a new pass.
    pub respawn_delay: f64,
    /// `t` advances by `dt · speed · speed_factor`.
    pub speed_factor: f64,
    /// Scene units per unit of `t`.
    pub path_scale: f64,
    /// Flattening constant `k` in `t² / (k · e)`.
    pub curvature: f64,
    /// Scene units of offset per unit of perihelion.
    pub perihelion_factor: f64,
}

impl Default for CometTuning {
    fn default() -> Self {
        Self {
            initial_t: -50.0,
            restart_t: -80.0,
            end_t: 80.0,
            respawn_delay: 30.0,
            speed_factor: 5.0,
            path_scale: 10.0,
            curvature: 15.0,
            perihelion_factor: 5.0,
        }
    }
}

/// Per-comet catalog values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometParams {
    pub speed: f64,
    pub eccentricity: f64,
    pub perihelion: f64,
}

/// State machine for one comet.
#[derive(Debug, Clone)]
pub struct CometFlyby {
    params: CometParams,
    tuning: CometTuning,
    phase: CometPhase,
    t: f64,
    timer: f64,
    position: DVec3,
    heading: f64,
}

impl CometFlyby {
    pub fn new(params: CometParams, tuning: CometTuning) -> Self {
        let mut comet = Self {
            params,
            tuning,
            phase: CometPhase::Active,
            t: tuning.initial_t,
            timer: 0.0,
            position: DVec3::ZERO,
            heading: 0.0,
        };
        comet.place();
        comet
    }

    pub fn phase(&self) -> CometPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase == CometPhase::Active
    }

    /// Current path parameter.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Seconds left before the next pass; 0 while active.
    pub fn respawn_remaining(&self) -> f64 {
        match self.phase {
            CometPhase::Active => 0.0,
            CometPhase::Waiting => (self.tuning.respawn_delay - self.timer).max(0.0),
        }
    }

    /// Position in scene units (y = 0).
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Yaw that points the comet at the origin.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Advance by `dt` seconds. At most one transition happens per call.
    pub fn advance(&mut self, dt: f64) -> Option<CometTransition> {
        if !(dt.is_finite() && dt > 0.0) {
            return None;
        }

        match self.phase {
            CometPhase::Waiting => {
                self.timer += dt;
                if self.timer >= self.tuning.respawn_delay {
                    self.phase = CometPhase::Active;
                    self.timer = 0.0;
                    self.t = self.tuning.restart_t;
                    self.place();
                    return Some(CometTransition::Returned);
                }
                None
            }
            CometPhase::Active => {
                self.t += dt * self.params.speed * self.tuning.speed_factor;
                self.place();
                if self.t > self.tuning.end_t {
                    self.phase = CometPhase::Waiting;
                    self.timer = 0.0;
                    return Some(CometTransition::Departed);
                }
                None
            }
        }
    }

    fn place(&mut self) {
        let scale = self.tuning.path_scale;
        let x = self.t * scale;
        let flattening = self.tuning.curvature * self.params.eccentricity;
        let bend = if flattening > 0.0 { self.t * self.t / flattening * scale } else { 0.0 };
        let z = bend - self.params.perihelion * self.tuning.perihelion_factor;

        self.position = DVec3::new(x, 0.0, z);
        self.heading = if x == 0.0 && z == 0.0 { 0.0 } else { (-x).atan2(-z) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halley() -> CometParams {
        CometParams { speed: 3.0, eccentricity: 0.8, perihelion: 50.0 }
    }

    fn from_restart() -> CometFlyby {
        let tuning = CometTuning { initial_t: -80.0, ..CometTuning::default() };
        CometFlyby::new(halley(), tuning)
    }

    #[test]
    fn starts_active_at_initial_parameter() {
        let comet = CometFlyby::new(halley(), CometTuning::default());
        assert_eq!(comet.phase(), CometPhase::Active);
        assert_eq!(comet.t(), -50.0);
        assert!(comet.is_visible());
    }

    #[test]
    fn path_follows_parabola() {
        let comet = CometFlyby::new(halley(), CometTuning::default());
        let p = comet.position();
        assert_eq!(p.x, -500.0);
        let expected_z = 2500.0 / (15.0 * 0.8) * 10.0 - 250.0;
        assert!((p.z - expected_z).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn faces_the_origin() {
        let comet = CometFlyby::new(halley(), CometTuning::default());
        let p = comet.position();
        let h = comet.heading();
        // Forward (+z rotated by yaw) must point back at the origin.
        let forward = DVec3::new(h.sin(), 0.0, h.cos());
        let to_origin = (-p).normalize();
        assert!(forward.dot(to_origin) > 1.0 - 1e-9);
    }

    #[test]
    fn departs_exactly_once_per_crossing() {
        let mut comet = from_restart();
        let mut departures = 0;
        // 160 units of t at 15 per second: crosses during the 11th step.
        for _ in 0..20 {
            if comet.advance(1.0) == Some(CometTransition::Departed) {
                departures += 1;
            }
        }
        assert_eq!(departures, 1);
        assert_eq!(comet.phase(), CometPhase::Waiting);
        assert!(!comet.is_visible());
    }

    #[test]
    fn a_huge_step_still_departs_once() {
        let mut comet = from_restart();
        assert_eq!(comet.advance(1000.0), Some(CometTransition::Departed));
        assert_eq!(comet.advance(1.0), None);
        assert_eq!(comet.phase(), CometPhase::Waiting);
    }

    #[test]
    fn respawns_exactly_once_after_delay() {
        let mut comet = from_restart();
        while comet.advance(1.0) != Some(CometTransition::Departed) {}

        let mut returns = 0;
        for step in 1..=30 {
            if comet.advance(1.0) == Some(CometTransition::Returned) {
                returns += 1;
                assert_eq!(step, 30);
            }
        }
        assert_eq!(returns, 1);
        assert_eq!(comet.phase(), CometPhase::Active);
        assert_eq!(comet.t(), -80.0);
        assert_eq!(comet.position().x, -800.0);
    }

    #[test]
    fn countdown_reports_remaining_time() {
        let mut comet = from_restart();
        comet.advance(1000.0);
        comet.advance(12.5);
        assert!((comet.respawn_remaining() - 17.5).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_freezes_both_phases() {
        let mut comet = from_restart();
        let before = comet.position();
        assert_eq!(comet.advance(0.0), None);
        assert_eq!(comet.position(), before);

        comet.advance(1000.0);
        let remaining = comet.respawn_remaining();
        for _ in 0..100 {
            comet.advance(0.0);
        }
        assert_eq!(comet.respawn_remaining(), remaining);
    }

    #[test]
    fn zero_eccentricity_drops_the_bend() {
        let params = CometParams { speed: 1.0, eccentricity: 0.0, perihelion: 10.0 };
        let comet = CometFlyby::new(params, CometTuning::default());
        assert!(comet.position().z.is_finite());
        assert_eq!(comet.position().z, -50.0);
    }
}
