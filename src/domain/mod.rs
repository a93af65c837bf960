// Domain layer: wire DTOs, printable reports and ports (interfaces).

pub mod model;
pub mod ports;
pub mod report;
