// Domain layer: row types, datasets and the ports the core talks through.

pub mod model;
pub mod ports;
