pub mod kepler;
pub mod rng;
pub mod scene;
pub mod time;
pub mod units;
