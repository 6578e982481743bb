// Domain layer: profile models and the ports the query service depends on.

pub mod model;
pub mod ports;
