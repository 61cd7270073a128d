pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, SceneScale, SimConfig};
pub use api::types::{BodyCategory, BodyId, SimEvent};
pub use assets::catalog::{Catalog, CatalogError, CometDef, MoonDef, PlanetDef, StarDef};
pub use bridge::protocol::{BodyTransform, SceneSink, TransformBuffer};
pub use components::body::{Body, PhysicalProps};
pub use components::comet::{CometFlyby, CometParams, CometPhase, CometTuning};
pub use components::entity::{Motion, SimBody};
pub use components::orbit::OrbitState;
pub use components::rotation::RotationState;
pub use crate::core::scene::Scene;
pub use crate::core::time::{FrameTime, SimClock};
pub use input::queue::{ControlEvent, ControlQueue};
pub use systems::format::{Locale, PeriodBreakdown, RotationBreakdown};
pub use systems::metrics::{
    compute_metrics, star_distance_m, MetricsReport, MetricsSnapshot, ObservedRotation,
};
pub use systems::simulation::{BodySummary, Simulation};
