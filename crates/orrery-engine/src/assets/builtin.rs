//! Built-in solar system.
//!
//! Physical values are real. Orbit radii and sizes are the display values
//! (orbit in AU, size relative to Earth). Eccentricities are J2000 and moon
//! periods are sidereal, negative for retrograde.

use super::catalog::{Catalog, CometDef, MoonDef, PlanetDef, StarDef};

impl StarDef {
    pub fn sun() -> Self {
        Self {
            name: "Sun".into(),
            mass: 1.9891e30,
            radius: Some(696_340.0),
            rotation_period: Some(609.12),
            surface_gravity: Some(274.0),
            desc: "The center of the solar system.".into(),
        }
    }
}

struct Orbiter {
    name: &'static str,
    orbit: f64,
    eccentricity: f64,
    speed: f64,
    size: f64,
    mass: f64,
    radius: f64,
    orbital_period: f64,
    rotation_period: f64,
    surface_gravity: f64,
    desc: &'static str,
}

impl Orbiter {
    fn into_def(self, moons: Vec<MoonDef>) -> PlanetDef {
        PlanetDef {
            name: self.name.into(),
            orbit: self.orbit,
            eccentricity: Some(self.eccentricity),
            speed: self.speed,
            size: self.size,
            mass: Some(self.mass),
            radius: Some(self.radius),
            orbital_period: Some(self.orbital_period),
            rotation_period: Some(self.rotation_period),
            surface_gravity: Some(self.surface_gravity),
            desc: self.desc.into(),
            moons,
        }
    }
}

fn moon(name: &str, size: f64, orbit: f64, speed: f64, period_days: f64) -> MoonDef {
    MoonDef {
        name: name.into(),
        orbit,
        speed,
        size,
        eccentricity: None,
        orbital_period: Some(period_days),
        rotation_period: None,
        desc: String::new(),
    }
}

fn planets() -> Vec<PlanetDef> {
    vec![
        Orbiter {
            name: "Mercury", orbit: 0.4, eccentricity: 0.20563, speed: 4.7, size: 0.38,
            mass: 3.3011e23, radius: 2439.7, orbital_period: 87.97,
            rotation_period: 1407.6, surface_gravity: 3.7,
            desc: "The closest planet to the Sun. It has almost no atmosphere.",
        }
        .into_def(vec![]),
        Orbiter {
            name: "Venus", orbit: 0.7, eccentricity: 0.00677, speed: 3.5, size: 0.95,
            mass: 4.8675e24, radius: 6051.8, orbital_period: 224.7,
            rotation_period: -5832.5, surface_gravity: 8.87,
            desc: "The hottest planet covered by thick carbon dioxide atmosphere.",
        }
        .into_def(vec![]),
        Orbiter {
            name: "Earth", orbit: 1.0, eccentricity: 0.01671, speed: 3.0, size: 1.0,
            mass: 5.97237e24, radius: 6371.0, orbital_period: 365.256,
            rotation_period: 23.934, surface_gravity: 9.82,
            desc: "The only planet with known life.",
        }
        .into_def(vec![moon("Moon", 0.27, 2.5, 2.0, 27.32)]),
        Orbiter {
            name: "Mars", orbit: 1.5, eccentricity: 0.09340, speed: 2.4, size: 0.53,
            mass: 6.4171e23, radius: 3389.5, orbital_period: 686.98,
            rotation_period: 24.6229, surface_gravity: 3.71,
            desc: "The red planet with iron oxide surface.",
        }
        .into_def(vec![
            moon("Phobos", 0.08, 1.2, 4.0, 0.32),
            moon("Deimos", 0.05, 1.8, 3.0, 1.26),
        ]),
        Orbiter {
            name: "Jupiter", orbit: 5.2, eccentricity: 0.04849, speed: 1.3, size: 11.2,
            mass: 1.8982e27, radius: 69911.0, orbital_period: 4332.59,
            rotation_period: 9.925, surface_gravity: 24.79,
            desc: "The largest gas giant in the solar system.",
        }
        .into_def(vec![
            moon("Io", 0.28, 13.0, 2.5, 1.77),
            moon("Europa", 0.25, 16.0, 2.0, 3.55),
            moon("Ganymede", 0.41, 20.0, 1.5, 7.15),
            moon("Callisto", 0.38, 26.0, 1.0, 16.69),
        ]),
        Orbiter {
            name: "Saturn", orbit: 9.5, eccentricity: 0.05551, speed: 0.9, size: 9.4,
            mass: 5.6834e26, radius: 58232.0, orbital_period: 10759.22,
            rotation_period: 10.656, surface_gravity: 10.44,
            desc: "The planet with beautiful rings.",
        }
        .into_def(vec![moon("Titan", 0.4, 18.0, 1.2, 15.95)]),
        Orbiter {
            name: "Uranus", orbit: 19.2, eccentricity: 0.04630, speed: 0.68, size: 4.0,
            mass: 8.6810e25, radius: 25362.0, orbital_period: 30688.5,
            rotation_period: -17.24, surface_gravity: 8.69,
            desc: "An ice giant with a tilted rotation axis.",
        }
        .into_def(vec![]),
        Orbiter {
            name: "Neptune", orbit: 30.0, eccentricity: 0.00899, speed: 0.54, size: 3.9,
            mass: 1.02413e26, radius: 24622.0, orbital_period: 60182.0,
            rotation_period: 16.11, surface_gravity: 11.15,
            desc: "The blue planet with strong storms.",
        }
        .into_def(vec![moon("Triton", 0.21, 5.0, -1.5, -5.877)]),
    ]
}

fn dwarfs() -> Vec<PlanetDef> {
    vec![
        Orbiter {
            name: "Ceres", orbit: 2.77, eccentricity: 0.0785, speed: 2.0, size: 0.08,
            mass: 9.393e20, radius: 469.7, orbital_period: 1681.63,
            rotation_period: 9.074, surface_gravity: 0.28,
            desc: "The only dwarf planet in the asteroid belt between Mars and Jupiter.",
        }
        .into_def(vec![]),
        Orbiter {
            name: "Pluto", orbit: 39.0, eccentricity: 0.2488, speed: 0.47, size: 0.18,
            mass: 1.303e22, radius: 1188.3, orbital_period: 90560.0,
            rotation_period: -153.282, surface_gravity: 0.62,
            desc: "Formerly the 9th planet, now reclassified as a dwarf planet.",
        }
        .into_def(vec![moon("Charon", 0.09, 1.0, 1.5, 6.387)]),
        Orbiter {
            name: "Haumea", orbit: 43.0, eccentricity: 0.195, speed: 0.4, size: 0.15,
            mass: 4.006e21, radius: 816.0, orbital_period: 103468.0,
            rotation_period: 3.915, surface_gravity: 0.401,
            desc: "An ellipsoid-shaped dwarf planet due to its rapid rotation.",
        }
        .into_def(vec![]),
        Orbiter {
            name: "Makemake", orbit: 45.0, eccentricity: 0.159, speed: 0.38, size: 0.16,
            mass: 3.1e21, radius: 715.0, orbital_period: 113183.0,
            rotation_period: 22.83, surface_gravity: 0.4,
            desc: "One of the brightest objects in the Kuiper Belt.",
        }
        .into_def(vec![]),
        Orbiter {
            name: "Eris", orbit: 67.0, eccentricity: 0.436, speed: 0.3, size: 0.18,
            mass: 1.6466e22, radius: 1163.0, orbital_period: 203830.0,
            rotation_period: 25.9, surface_gravity: 0.82,
            desc: "A scattered disc object slightly more massive than Pluto.",
        }
        .into_def(vec![]),
    ]
}

fn comet(
    name: &str,
    size: f64,
    speed: f64,
    eccentricity: f64,
    perihelion: f64,
    desc: &str,
) -> CometDef {
    CometDef {
        name: name.into(),
        speed,
        size,
        eccentricity,
        perihelion,
        desc: desc.into(),
    }
}

fn comets() -> Vec<CometDef> {
    vec![
        comet("1P/Halley", 0.1, 3.0, 0.8, 50.0,
            "A famous comet that visits Earth approximately every 75 years."),
        comet("1I/'Oumuamua", 0.05, 5.0, 1.2, 30.0,
            "An interstellar object passing through the solar system."),
        comet("C/2019 Y4 (ATLAS)", 0.08, 2.5, 0.9, 40.0,
            "A comet that fragmented and created a spectacular display."),
    ]
}

impl Catalog {
    /// The solar system shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            star: StarDef::sun(),
            planets: planets(),
            dwarfs: dwarfs(),
            comets: comets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.planets.len(), 8);
        assert_eq!(catalog.dwarfs.len(), 5);
        assert_eq!(catalog.comets.len(), 3);
        let moons: usize =
            catalog.planets.iter().chain(&catalog.dwarfs).map(|p| p.moons.len()).sum();
        assert_eq!(moons, 10);
        assert_eq!(catalog.body_count(), 1 + 8 + 5 + 10 + 3);
    }

    #[test]
    fn retrograde_bodies_keep_their_sign() {
        let catalog = Catalog::builtin();
        let venus = catalog.planets.iter().find(|p| p.name == "Venus").unwrap();
        assert!(venus.rotation_period.unwrap() < 0.0);
        let triton = catalog.planets[7].moons.iter().find(|m| m.name == "Triton").unwrap();
        assert!(triton.orbital_period.unwrap() < 0.0);
        assert!(triton.speed < 0.0);
    }

    #[test]
    fn builtin_survives_json() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back.body_count(), catalog.body_count());
        assert_eq!(back.star.name, "Sun");
        assert_eq!(back.comets[1].name, "1I/'Oumuamua");
    }
}
