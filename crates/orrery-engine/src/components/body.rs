use crate::api::types::{BodyCategory, BodyId};

/// Physical constants of a body. Every field is optional; comets carry none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicalProps {
    /// Mass (kg).
    pub mass_kg: Option<f64>,
    /// Mean radius (km).
    pub radius_km: Option<f64>,
    /// Sidereal rotation period (hours). Negative means retrograde.
    pub rotation_period_hours: Option<f64>,
    /// Surface gravity (m/s²).
    pub surface_gravity: Option<f64>,
}

/// Identity and descriptive data for one body. Immutable after creation.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub category: BodyCategory,
    pub physical: PhysicalProps,
    pub description: String,
    /// Rendered radius in scene units.
    pub size: f64,
    /// Planet this body orbits, for moons.
    pub parent: Option<BodyId>,
}

impl Body {
    pub fn new(id: BodyId, name: impl Into<String>, category: BodyCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            physical: PhysicalProps::default(),
            description: String::new(),
            size: 1.0,
            parent: None,
        }
    }

    // -- Builder pattern --

    pub fn with_physical(mut self, physical: PhysicalProps) -> Self {
        self.physical = physical;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }
}
