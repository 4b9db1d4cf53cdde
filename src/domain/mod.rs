// Domain layer: core models and ports (interfaces). No external
// dependencies beyond serde/chrono where the wire contract needs them.

pub mod model;
pub mod ports;
