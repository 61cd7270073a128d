use crate::api::types::SimEvent;
use crate::components::comet::CometTransition;
use crate::components::entity::Motion;
use crate::core::scene::Scene;
use crate::core::time::FrameTime;

/// Advance every body by one tick and refresh world positions.
///
/// Bodies are visited in storage order, which puts every parent before its
/// satellites, so a moon is always anchored to its planet's position for the
/// current tick. Comet phase changes are appended to `events`.
pub fn step(scene: &mut Scene, frame: &FrameTime, events: &mut Vec<SimEvent>) {
    let star_position = scene.star_position();
    let bodies = scene.bodies_mut();

    for index in 0..bodies.len() {
        let (placed, rest) = bodies.split_at_mut(index);
        let entity = &mut rest[0];

        let anchor = match entity.parent_index {
            Some(parent) if parent < index => placed[parent].world_position,
            _ => star_position,
        };

        match &mut entity.motion {
            Motion::EllipticalOrbit(orbit) => {
                orbit.advance(frame.sim_dt);
                entity.rotation.advance(frame.sim_dt);
                entity.world_position = anchor + orbit.local_position();
            }
            Motion::SimpleRotation => {
                entity.rotation.advance(frame.sim_dt);
            }
            Motion::CometFlyby(comet) => {
                let transition = comet.advance(frame.comet_dt);
                entity.world_position = star_position + comet.position();

                let id = entity.body.id;
                match transition {
                    Some(CometTransition::Departed) => {
                        log::info!("{} left the inner system", entity.body.name);
                        events.push(SimEvent::comet_departed(id));
                    }
                    Some(CometTransition::Returned) => {
                        log::info!("{} is back", entity.body.name);
                        events.push(SimEvent::comet_returned(id));
                    }
                    None => {}
                }
            }
        }
    }
}
