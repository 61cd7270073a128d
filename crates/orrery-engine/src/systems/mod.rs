pub mod format;
pub mod integrator;
pub mod metrics;
pub mod populate;
pub mod selection;
pub mod simulation;
