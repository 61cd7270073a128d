use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound (exclusive) on orbit eccentricity accepted from a catalog.
pub const MAX_ECCENTRICITY: f64 = 1.2;

/// Errors raised while loading or checking a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("body with an empty name")]
    EmptyName,
    #[error("duplicate body name {0:?}")]
    DuplicateName(String),
    #[error("{name}: {field} must be finite, got {value}")]
    NonFinite {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("{name}: negative {field} {value}")]
    Negative {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("{name}: eccentricity {value} outside [0, {max})", max = MAX_ECCENTRICITY)]
    Eccentricity { name: String, value: f64 },
}

/// The central star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarDef {
    pub name: String,
    /// kg
    pub mass: f64,
    /// km
    #[serde(default)]
    pub radius: Option<f64>,
    /// hours
    #[serde(default)]
    pub rotation_period: Option<f64>,
    /// m/s²
    #[serde(default)]
    pub surface_gravity: Option<f64>,
    #[serde(default)]
    pub desc: String,
}

/// A planet or dwarf planet orbiting the star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetDef {
    pub name: String,
    /// Semi-major axis (AU).
    pub orbit: f64,
    #[serde(default)]
    pub eccentricity: Option<f64>,
    /// Relative angular rate used when `orbital_period` is absent.
    #[serde(default)]
    pub speed: f64,
    /// Visual size, multiplied by the planet scale.
    pub size: f64,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    /// days, negative for retrograde
    #[serde(default)]
    pub orbital_period: Option<f64>,
    /// hours, negative for retrograde
    #[serde(default)]
    pub rotation_period: Option<f64>,
    #[serde(default)]
    pub surface_gravity: Option<f64>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub moons: Vec<MoonDef>,
}

/// A moon orbiting its planet. `orbit` is in planet-relative scene steps,
/// not AU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonDef {
    pub name: String,
    pub orbit: f64,
    #[serde(default)]
    pub speed: f64,
    pub size: f64,
    #[serde(default)]
    pub eccentricity: Option<f64>,
    /// days, negative for retrograde
    #[serde(default)]
    pub orbital_period: Option<f64>,
    #[serde(default)]
    pub rotation_period: Option<f64>,
    #[serde(default)]
    pub desc: String,
}

/// A comet on a flyby path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CometDef {
    pub name: String,
    pub speed: f64,
    pub size: f64,
    pub eccentricity: f64,
    pub perihelion: f64,
    #[serde(default)]
    pub desc: String,
}

/// Static body definitions, loaded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "StarDef::sun")]
    pub star: StarDef,
    #[serde(default)]
    pub planets: Vec<PlanetDef>,
    #[serde(default)]
    pub dwarfs: Vec<PlanetDef>,
    #[serde(default)]
    pub comets: Vec<CometDef>,
}

impl Catalog {
    /// Parse and validate a catalog from JSON. Unknown keys (colors, ring
    /// flags) are ignored.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Number of bodies the catalog produces, the star included.
    pub fn body_count(&self) -> usize {
        let orbiting = self.planets.iter().chain(&self.dwarfs);
        1 + orbiting.map(|p| 1 + p.moons.len()).sum::<usize>() + self.comets.len()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        let mut claim = |name: &str| -> Result<(), CatalogError> {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !names.insert(trimmed.to_lowercase()) {
                return Err(CatalogError::DuplicateName(trimmed.to_string()));
            }
            Ok(())
        };

        let star = &self.star;
        claim(&star.name)?;
        non_negative(&star.name, "mass", star.mass)?;
        optional(&star.name, "radius", star.radius)?;
        optional(&star.name, "rotationPeriod", star.rotation_period)?;
        optional(&star.name, "surfaceGravity", star.surface_gravity)?;

        for planet in self.planets.iter().chain(&self.dwarfs) {
            let name = &planet.name;
            claim(name)?;
            non_negative(name, "orbit", planet.orbit)?;
            non_negative(name, "size", planet.size)?;
            finite(name, "speed", planet.speed)?;
            eccentricity(name, planet.eccentricity)?;
            optional(name, "mass", planet.mass)?;
            optional(name, "radius", planet.radius)?;
            optional(name, "orbitalPeriod", planet.orbital_period)?;
            optional(name, "rotationPeriod", planet.rotation_period)?;
            optional(name, "surfaceGravity", planet.surface_gravity)?;

            for moon in &planet.moons {
                let name = &moon.name;
                claim(name)?;
                non_negative(name, "orbit", moon.orbit)?;
                non_negative(name, "size", moon.size)?;
                finite(name, "speed", moon.speed)?;
                eccentricity(name, moon.eccentricity)?;
                optional(name, "orbitalPeriod", moon.orbital_period)?;
                optional(name, "rotationPeriod", moon.rotation_period)?;
            }
        }

        // Flyby paths are not Kepler orbits, so any e >= 0 is fine.
        for comet in &self.comets {
            let name = &comet.name;
            claim(name)?;
            finite(name, "speed", comet.speed)?;
            non_negative(name, "size", comet.size)?;
            non_negative(name, "eccentricity", comet.eccentricity)?;
            finite(name, "perihelion", comet.perihelion)?;
        }

        Ok(())
    }
}

fn finite(name: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CatalogError::NonFinite { name: name.to_string(), field, value })
    }
}

fn non_negative(name: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    finite(name, field, value)?;
    if value < 0.0 {
        return Err(CatalogError::Negative { name: name.to_string(), field, value });
    }
    Ok(())
}

fn optional(name: &str, field: &'static str, value: Option<f64>) -> Result<(), CatalogError> {
    value.map_or(Ok(()), |v| finite(name, field, v))
}

fn eccentricity(name: &str, value: Option<f64>) -> Result<(), CatalogError> {
    let Some(value) = value else {
        return Ok(());
    };
    finite(name, "eccentricity", value)?;
    if !(0.0..MAX_ECCENTRICITY).contains(&value) {
        return Err(CatalogError::Eccentricity { name: name.to_string(), value });
    }
    Ok(())
}
