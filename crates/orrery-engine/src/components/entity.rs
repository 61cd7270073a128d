use glam::DVec3;

use crate::api::types::BodyId;
use crate::components::body::Body;
use crate::components::comet::CometFlyby;
use crate::components::orbit::OrbitState;
use crate::components::rotation::RotationState;

/// How a body moves. Chosen once at creation; the integrator dispatches on it.
#[derive(Debug, Clone)]
pub enum Motion {
    /// Keplerian ellipse around the star, or around a parent planet.
    EllipticalOrbit(OrbitState),
    /// Fixed in place, spinning only (the star).
    SimpleRotation,
    /// Parametric flyby path with a respawn cycle.
    CometFlyby(CometFlyby),
}

impl Motion {
    pub fn orbit(&self) -> Option<&OrbitState> {
        match self {
            Motion::EllipticalOrbit(orbit) => Some(orbit),
            _ => None,
        }
    }

    pub fn comet(&self) -> Option<&CometFlyby> {
        match self {
            Motion::CometFlyby(comet) => Some(comet),
            _ => None,
        }
    }
}

/// One body in the scene: identity, motion and the derived world transform.
#[derive(Debug, Clone)]
pub struct SimBody {
    pub body: Body,
    pub motion: Motion,
    pub rotation: RotationState,
    /// World position in scene units, refreshed every tick.
    pub(crate) world_position: DVec3,
    /// Index of the parent in the scene's body list (always lower than ours).
    pub(crate) parent_index: Option<usize>,
}

impl SimBody {
    pub fn new(body: Body, motion: Motion) -> Self {
        let rotation = RotationState::new(body.physical.rotation_period_hours);
        Self {
            body,
            motion,
            rotation,
            world_position: DVec3::ZERO,
            parent_index: None,
        }
    }

    pub fn id(&self) -> BodyId {
        self.body.id
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }

    pub fn world_position(&self) -> DVec3 {
        self.world_position
    }

    /// Orientation handed to the renderer: spin angle, or heading for comets.
    pub fn facing(&self) -> f64 {
        match &self.motion {
            Motion::CometFlyby(comet) => comet.heading(),
            _ => self.rotation.angle(),
        }
    }

    /// Waiting comets are hidden; everything else is always drawn.
    pub fn is_visible(&self) -> bool {
        match &self.motion {
            Motion::CometFlyby(comet) => comet.is_visible(),
            _ => true,
        }
    }
}
