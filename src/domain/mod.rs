// Domain layer: vote models, the result document wire format, the Space manifest and ports.

pub mod manifest;
pub mod model;
pub mod ports;
pub mod results;
