// Domain layer: audit models and ports. Only std/chrono beyond the error types.

pub mod model;
pub mod ports;
