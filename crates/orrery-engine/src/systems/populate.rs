//! Builds the scene from a catalog.
//!
//! Bodies are spawned in dependency order (star, then each planet followed by
//! its moons, then comets) with sequential ids starting at 0 for the star.

use crate::api::config::SimConfig;
use crate::api::types::{BodyCategory, BodyId};
use crate::assets::catalog::{Catalog, CometDef, MoonDef, PlanetDef};
use crate::components::body::{Body, PhysicalProps};
use crate::components::comet::{CometFlyby, CometParams};
use crate::components::entity::{Motion, SimBody};
use crate::components::orbit::OrbitState;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::units::au_to_meters;

/// Scene units between a planet's surface-scaled size and its first moon slot.
const MOON_PARENT_CLEARANCE: f64 = 2.0;
/// Scene units per unit of catalog moon orbit.
const MOON_ORBIT_STEP: f64 = 4.0;

struct IdAllocator(u32);

impl IdAllocator {
    fn next(&mut self) -> BodyId {
        let id = BodyId(self.0);
        self.0 += 1;
        id
    }
}

/// Create every body in `catalog`. Initial mean anomalies come from a PRNG
/// seeded with `config.seed`, so the same seed gives the same sky.
pub fn populate(catalog: &Catalog, config: &SimConfig) -> Scene {
    let mut scene = Scene::new();
    let mut rng = Rng::new(config.seed);
    let mut ids = IdAllocator(0);

    let star = &catalog.star;
    let sun = Body::new(ids.next(), star.name.as_str(), BodyCategory::Star)
        .with_physical(PhysicalProps {
            mass_kg: Some(star.mass),
            radius_km: star.radius,
            rotation_period_hours: star.rotation_period,
            surface_gravity: star.surface_gravity,
        })
        .with_description(star.desc.as_str())
        .with_size(config.scale.sun);
    scene.spawn(SimBody::new(sun, Motion::SimpleRotation));

    let orbiting = catalog
        .planets
        .iter()
        .map(|p| (p, BodyCategory::Planet))
        .chain(catalog.dwarfs.iter().map(|p| (p, BodyCategory::Dwarf)));
    for (def, category) in orbiting {
        let planet = spawn_planet(&mut scene, &mut ids, &mut rng, config, def, category);
        for moon in &def.moons {
            spawn_moon(&mut scene, &mut ids, &mut rng, config, def, planet, moon);
        }
    }

    for def in &catalog.comets {
        spawn_comet(&mut scene, &mut ids, config, def);
    }

    log::info!(
        "populated {} bodies ({} planets, {} dwarfs, {} comets)",
        scene.len(),
        catalog.planets.len(),
        catalog.dwarfs.len(),
        catalog.comets.len()
    );
    scene
}

fn spawn_planet(
    scene: &mut Scene,
    ids: &mut IdAllocator,
    rng: &mut Rng,
    config: &SimConfig,
    def: &PlanetDef,
    category: BodyCategory,
) -> BodyId {
    let id = ids.next();
    let body = Body::new(id, def.name.as_str(), category)
        .with_physical(PhysicalProps {
            mass_kg: def.mass,
            radius_km: def.radius,
            rotation_period_hours: def.rotation_period,
            surface_gravity: def.surface_gravity,
        })
        .with_description(def.desc.as_str())
        .with_size(def.size * config.scale.planet);

    let mut orbit = OrbitState::new(def.orbit * config.scale.orbit, def.eccentricity.unwrap_or(0.0))
        .with_real_axis_m(au_to_meters(def.orbit))
        .with_speed(def.speed)
        .with_base_offset(config.scale.sun)
        .with_initial_mean_anomaly(rng.next_angle());
    match def.orbital_period {
        Some(days) => orbit = orbit.with_period_days(days),
        None => log::warn!("{}: no orbital period, using angular-rate fallback", def.name),
    }

    scene.spawn(SimBody::new(body, Motion::EllipticalOrbit(orbit)));
    id
}

fn spawn_moon(
    scene: &mut Scene,
    ids: &mut IdAllocator,
    rng: &mut Rng,
    config: &SimConfig,
    parent_def: &PlanetDef,
    parent: BodyId,
    def: &MoonDef,
) {
    let parent_size = parent_def.size * config.scale.planet;
    let axis = parent_size * MOON_PARENT_CLEARANCE + def.orbit * MOON_ORBIT_STEP;

    let body = Body::new(ids.next(), def.name.as_str(), BodyCategory::Moon)
        .with_physical(PhysicalProps {
            rotation_period_hours: def.rotation_period,
            ..PhysicalProps::default()
        })
        .with_description(def.desc.as_str())
        .with_size(def.size * config.scale.planet)
        .with_parent(parent);

    let mut orbit = OrbitState::new(axis, def.eccentricity.unwrap_or(0.0))
        .with_speed(def.speed)
        .satellite()
        .with_initial_mean_anomaly(rng.next_angle());
    match def.orbital_period {
        Some(days) => orbit = orbit.with_period_days(days),
        None => log::warn!("{}: no orbital period, using angular-rate fallback", def.name),
    }

    scene.spawn(SimBody::new(body, Motion::EllipticalOrbit(orbit)));
}

fn spawn_comet(scene: &mut Scene, ids: &mut IdAllocator, config: &SimConfig, def: &CometDef) {
    let body = Body::new(ids.next(), def.name.as_str(), BodyCategory::Comet)
        .with_description(def.desc.as_str())
        .with_size(def.size * config.scale.planet);
    let params = CometParams {
        speed: def.speed,
        eccentricity: def.eccentricity,
        perihelion: def.perihelion,
    };
    if def.eccentricity <= 0.0 {
        log::warn!("{}: non-positive eccentricity, flyby path is a straight line", def.name);
    }
    scene.spawn(SimBody::new(body, Motion::CometFlyby(CometFlyby::new(params, config.comet))));
}
