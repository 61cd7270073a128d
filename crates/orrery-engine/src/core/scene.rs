use glam::DVec3;

use crate::api::types::{BodyCategory, BodyId};
use crate::components::entity::SimBody;

/// Flat body storage in dependency order: a parent is always stored before
/// its satellites, so a single front-to-back pass sees parents updated first.
/// Sized for a solar system (tens of bodies), not millions.
pub struct Scene {
    bodies: Vec<SimBody>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(64),
        }
    }

    /// Add a body. Its parent, if any, must already be in the scene.
    /// Returns false (and drops the body) on a duplicate id.
    pub fn spawn(&mut self, mut entity: SimBody) -> bool {
        if self.index_of(entity.id()).is_some() {
            log::warn!("duplicate body id {:?} ({}), skipped", entity.id(), entity.name());
            return false;
        }

        entity.parent_index = match entity.body.parent {
            Some(parent) => {
                let index = self.index_of(parent);
                if index.is_none() {
                    log::warn!(
                        "{}: parent {:?} not spawned yet, orbiting the star instead",
                        entity.name(),
                        parent
                    );
                }
                index
            }
            None => None,
        };

        self.bodies.push(entity);
        true
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id() == id)
    }

    pub fn get(&self, id: BodyId) -> Option<&SimBody> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    /// The body `entity` is anchored to, or `None` when it circles the star.
    pub fn parent_of(&self, entity: &SimBody) -> Option<&SimBody> {
        entity.parent_index.and_then(|index| self.bodies.get(index))
    }

    /// Case-insensitive lookup by name.
    pub fn find_by_name(&self, name: &str) -> Option<&SimBody> {
        self.bodies.iter().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// The central star, if the scene has one.
    pub fn star(&self) -> Option<&SimBody> {
        self.bodies.iter().find(|b| b.body.category == BodyCategory::Star)
    }

    /// Position every star-centred orbit is measured from.
    pub fn star_position(&self) -> DVec3 {
        self.star().map(|s| s.world_position()).unwrap_or(DVec3::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimBody> {
        self.bodies.iter()
    }

    /// All bodies, in dependency order.
    pub(crate) fn bodies_mut(&mut self) -> &mut [SimBody] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
