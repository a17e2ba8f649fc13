// Domain layer: pin models and the ports (storage, configuration) the store depends on.

pub mod model;
pub mod ports;
