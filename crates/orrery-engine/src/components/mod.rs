pub mod body;
pub mod comet;
pub mod entity;
pub mod orbit;
pub mod rotation;
