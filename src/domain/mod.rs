// Domain layer: entity models, partial updates and ports. No storage SDKs here.

pub mod model;
pub mod patch;
pub mod ports;
pub mod upload;
