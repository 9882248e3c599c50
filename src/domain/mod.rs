// Domain layer: value types and ports (interfaces) shared by core, adapters and transport.

pub mod model;
pub mod ports;
